//! Command line interface

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;

use crate::coverage::{coverage_vectors, fault_coverage};
use crate::error::Result;
use crate::io::{read_network_file, write_network_file};
use crate::netlist::{analyze_gates, analyze_xilinx, implementation_name, read_netlist_file};
use crate::network::area::AreaParameters;
use crate::network::stats::stats;
use crate::network::variants::Variant;
use crate::oracle::{FullAdderOracle, DEFAULT_RANDOM_COUNT, DEFAULT_SEED};
use crate::report::{FpgaReport, GateReport, VariantReport, VerificationReport};
use crate::sim::SimulatedAdder;
use crate::Network;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Verify full adder implementations against the reference model
    ///
    /// All 8 input combinations are applied, optionally followed by random vectors.
    /// The command fails if any implementation produces a wrong output.
    #[clap()]
    Verify(VerifyArgs),

    /// Show statistics about full adder implementations
    ///
    /// Will print the number of gates, and the estimated transistor and LUT counts.
    #[clap()]
    Show(ShowArgs),

    /// Write a built-in full adder variant to a .bench file
    #[clap()]
    Export(ExportArgs),

    /// Measure how many stuck-at faults the verification detects
    ///
    /// Fault types are:
    ///   * Output stuck-at fault, where the output of the gate is stuck at a constant value
    ///   * Input stuck-at fault, where the input of the gate is stuck at a constant value
    #[clap(alias = "cov")]
    Coverage(CoverageArgs),

    /// Count the cells in synthesized Yosys netlists
    #[clap()]
    Gates(GatesArgs),

    /// Estimate FPGA resources from synthesized netlists
    #[clap()]
    Fpga(FpgaArgs),
}

impl Commands {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        match self {
            Commands::Verify(a) => a.run(),
            Commands::Show(a) => a.run(),
            Commands::Export(a) => a.run(),
            Commands::Coverage(a) => a.run(),
            Commands::Gates(a) => a.run(),
            Commands::Fpga(a) => a.run(),
        }
    }
}

/// Implementations to work on: .bench files and built-in variants
#[derive(Args)]
pub struct TargetArgs {
    /// Full adders in .bench format, with inputs (a, b, cin) and outputs (sum, cout)
    files: Vec<PathBuf>,

    /// Built-in variants; all of them if no file or variant is given
    #[arg(short = 'v', long = "variant", value_enum)]
    variants: Vec<Variant>,
}

impl TargetArgs {
    fn variants(&self) -> Vec<Variant> {
        if self.files.is_empty() && self.variants.is_empty() {
            Variant::all().to_vec()
        } else {
            self.variants.clone()
        }
    }

    fn networks(&self) -> Result<Vec<(String, Network)>> {
        let mut ret = Vec::new();
        for v in self.variants() {
            ret.push((v.label().to_string(), v.build()));
        }
        for f in &self.files {
            ret.push((implementation_name(f), read_network_file(f)?));
        }
        Ok(ret)
    }
}

/// Random vectors applied in addition to the exhaustive ones
#[derive(Args)]
pub struct RandomArgs {
    /// Also apply random vectors
    #[arg(long)]
    random: bool,

    /// Number of random vectors
    #[arg(short = 'n', long, default_value_t = DEFAULT_RANDOM_COUNT)]
    count: usize,

    /// Seed for random vector generation
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn write_report(path: &Path, content: String) -> Result<()> {
    std::fs::write(path, content)?;
    info!("Report written to {}", path.display());
    Ok(())
}

/// Command arguments for verification
#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    target: TargetArgs,

    #[command(flatten)]
    random: RandomArgs,

    /// Output file for a Markdown report
    #[arg(short = 'r', long)]
    report: Option<PathBuf>,
}

impl VerifyArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let mut results = Vec::new();
        for (name, net) in self.target.networks()? {
            let oracle = FullAdderOracle::new(name.clone());
            let mut dut = SimulatedAdder::new(&net)?;
            let mut summary = oracle.run_exhaustive(&mut dut);
            if self.random.random {
                summary = summary.merge(oracle.run_random(
                    &mut dut,
                    self.random.count,
                    self.random.seed,
                ));
            }
            println!("{}:\n{}", name, summary);
            results.push((name, summary));
        }
        if let Some(path) = &self.report {
            write_report(path, VerificationReport::new(&results).to_string())?;
        }
        for (name, summary) in results {
            summary.into_result(&name)?;
        }
        Ok(())
    }
}

/// Command arguments for network informations
#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Output file for a Markdown table of the variants
    #[arg(short = 'r', long)]
    report: Option<PathBuf>,
}

impl ShowArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let transistors = AreaParameters::transistors();
        let luts = AreaParameters::luts();
        for (name, net) in self.target.networks()? {
            println!("{}:", name);
            println!("{}", stats(&net));
            println!("  Transistors: {}", transistors.area(&net));
            println!("  LUTs: {}\n", luts.area(&net));
        }
        if let Some(path) = &self.report {
            let variants = self.target.variants();
            write_report(path, VariantReport::new(&variants).to_string())?;
        }
        Ok(())
    }
}

/// Command arguments for export
#[derive(Args)]
pub struct ExportArgs {
    /// Variant to export
    #[arg(value_enum)]
    variant: Variant,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,
}

impl ExportArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        write_network_file(&self.output, &self.variant.build())?;
        info!("{} written to {}", self.variant, self.output.display());
        Ok(())
    }
}

/// Command arguments for fault coverage
#[derive(Args)]
pub struct CoverageArgs {
    #[command(flatten)]
    target: TargetArgs,

    #[command(flatten)]
    random: RandomArgs,
}

impl CoverageArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let random = if self.random.random {
            Some((self.random.count, self.random.seed))
        } else {
            None
        };
        let vectors = coverage_vectors(random);
        for (name, net) in self.target.networks()? {
            // The fault-free network must pass first
            let oracle = FullAdderOracle::new(name.clone());
            oracle
                .run_exhaustive(&mut SimulatedAdder::new(&net)?)
                .into_result(&name)?;
            let cov = fault_coverage(&net, &vectors)?;
            println!("{}:\n{}", name, cov);
        }
        Ok(())
    }
}

/// Command arguments for gate analysis
#[derive(Args)]
pub struct GatesArgs {
    /// Netlists written by Yosys after generic synthesis
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output file for the Markdown report; printed if not given
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl GatesArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let mut results = Vec::new();
        for f in &self.files {
            let analysis = analyze_gates(&read_netlist_file(f)?);
            info!(
                "{}: {} gates, {} transistors",
                f.display(),
                analysis.total_primitive_gates(),
                analysis.total_transistors()
            );
            results.push((implementation_name(f), analysis));
        }
        let report = GateReport::new(&results).to_string();
        match &self.output {
            Some(path) => write_report(path, report),
            None => {
                println!("{}", report);
                Ok(())
            }
        }
    }
}

/// Command arguments for FPGA resource estimation
#[derive(Args)]
pub struct FpgaArgs {
    /// Synthesized netlists
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Netlists are mapped to Xilinx primitives, rather than Yosys generic cells
    #[arg(long)]
    xilinx: bool,

    /// Output file for the Markdown report; printed if not given
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl FpgaArgs {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        let report = if self.xilinx {
            let mut results = Vec::new();
            for f in &self.files {
                let analysis = analyze_xilinx(&read_netlist_file(f)?);
                info!("{}: {} LUTs", f.display(), analysis.total_luts());
                results.push((implementation_name(f), analysis));
            }
            FpgaReport::Xilinx(&results).to_string()
        } else {
            let mut results = Vec::new();
            for f in &self.files {
                let analysis = analyze_gates(&read_netlist_file(f)?);
                info!("{}: {} LUTs", f.display(), analysis.estimated_luts());
                results.push((implementation_name(f), analysis));
            }
            FpgaReport::Estimate(&results).to_string()
        };
        match &self.output {
            Some(path) => write_report(path, report),
            None => {
                println!("{}", report);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_verify() {
        let cli = Cli::try_parse_from(["adderkit", "verify", "-v", "nand", "--random", "-n", "20"])
            .unwrap();
        match cli.command {
            Commands::Verify(a) => {
                assert_eq!(a.target.variants(), vec![Variant::Nand]);
                assert!(a.random.random);
                assert_eq!(a.random.count, 20);
                assert_eq!(a.random.seed, DEFAULT_SEED);
            }
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_default_targets() {
        let cli = Cli::try_parse_from(["adderkit", "show"]).unwrap();
        match cli.command {
            Commands::Show(a) => {
                assert_eq!(a.target.variants().len(), 6);
                assert_eq!(a.target.networks().unwrap().len(), 6);
            }
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_verify_variants() {
        let cli = Cli::try_parse_from(["adderkit", "verify", "--random"]).unwrap();
        assert!(cli.command.run().is_ok());
    }

    #[test]
    fn test_wrong_implementation_fails() {
        let dir = std::env::temp_dir().join(format!("adderkit_cmd_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let bench = dir.join("full_adder_broken.bench");
        let report = dir.join("report.md");
        std::fs::write(
            &bench,
            "INPUT(a)
INPUT(b)
INPUT(cin)
OUTPUT(sum)
OUTPUT(cout)
p = XOR(a, b)
sum = XOR(p, cin)
g = AND(a, b)
t = AND(p, cin)
cout = AND(g, t)
",
        )
        .unwrap();
        let bench_arg = bench.to_str().unwrap();
        let report_arg = report.to_str().unwrap();

        let cli = Cli::try_parse_from(["adderkit", "verify", bench_arg, "-r", report_arg]).unwrap();
        let res = cli.command.run();
        assert!(matches!(
            res,
            Err(Error::Mismatch {
                nb_failed: 4,
                nb_tests: 8,
                ..
            })
        ));
        let text = std::fs::read_to_string(&report).unwrap();
        assert!(text.contains("| Broken | 8 | 4 | 4 | 50.00% | FAIL |"));

        let cli = Cli::try_parse_from(["adderkit", "coverage", bench_arg]).unwrap();
        assert!(matches!(cli.command.run(), Err(Error::Mismatch { .. })));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_netlist_commands_need_files() {
        assert!(Cli::try_parse_from(["adderkit", "gates"]).is_err());
        assert!(Cli::try_parse_from(["adderkit", "fpga", "--xilinx"]).is_err());
    }
}
