//! IO for .bench (ISCAS) files

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};

use volute::Lut;

use crate::error::{Error, Result};
use crate::network::{BinaryType, NaryType, TernaryType};
use crate::{Gate, Network, Signal};

use super::utils::sig_to_string;

/// Largest Lut accepted, as on 6-input FPGA Luts
const MAX_LUT_INPUTS: usize = 6;

/// A gate statement: line number, then output name, gate type and input names
struct Statement {
    line: usize,
    parts: Vec<String>,
}

fn parse_error(line: usize, message: String) -> Error {
    Error::Parse { line, message }
}

fn build_name_to_sig(
    statements: &[Statement],
    inputs: &[(usize, String)],
) -> Result<HashMap<String, Signal>> {
    let mut ret = HashMap::new();
    for (i, (line, name)) in inputs.iter().enumerate() {
        if ret.insert(name.clone(), Signal::from_input(i as u32)).is_some() {
            return Err(parse_error(*line, format!("{name} is defined twice")));
        }
    }
    for (i, s) in statements.iter().enumerate() {
        if ret
            .insert(s.parts[0].clone(), Signal::from_var(i as u32))
            .is_some()
        {
            return Err(parse_error(s.line, format!("{} is defined twice", s.parts[0])));
        }
    }

    // ABC-style naming for constant signals
    ret.entry("vdd".to_string()).or_insert(Signal::one());
    ret.entry("gnd".to_string()).or_insert(Signal::zero());
    Ok(ret)
}

fn check_statement(statement: &Statement, name_to_sig: &HashMap<String, Signal>) -> Result<()> {
    let deps = &statement.parts[2..];
    for dep in deps {
        if !name_to_sig.contains_key(dep) {
            return Err(parse_error(
                statement.line,
                format!("gate input {dep} is not generated anywhere"),
            ));
        }
    }
    let expected = match statement.parts[1].to_uppercase().as_str() {
        "BUF" | "BUFF" | "NOT" => Some(1),
        "VDD" | "VSS" | "GND" => Some(0),
        "MUX" | "MAJ" => Some(3),
        _ => None,
    };
    match expected {
        Some(nb) if nb != deps.len() => Err(parse_error(
            statement.line,
            format!(
                "{} expects {} inputs, got {}",
                statement.parts[1],
                nb,
                deps.len()
            ),
        )),
        _ => Ok(()),
    }
}

fn network_from_statements(
    statements: &[Statement],
    inputs: &[(usize, String)],
    outputs: &[(usize, String)],
) -> Result<Network> {
    let mut ret = Network::new();
    ret.add_inputs(inputs.len());

    let name_to_sig = build_name_to_sig(statements, inputs)?;
    for statement in statements {
        check_statement(statement, &name_to_sig)?;
    }
    for (line, output) in outputs {
        if !name_to_sig.contains_key(output) {
            return Err(parse_error(
                *line,
                format!("output {output} is not generated anywhere"),
            ));
        }
    }

    for s in statements {
        let sigs: Box<[Signal]> = s.parts[2..].iter().map(|n| name_to_sig[n]).collect();
        let gate = match s.parts[1].to_uppercase().as_str() {
            "BUF" | "BUFF" => Gate::Buf(sigs[0]),
            "NOT" => Gate::Buf(!sigs[0]),
            "VDD" => Gate::Buf(Signal::one()),
            "VSS" | "GND" => Gate::Buf(Signal::zero()),
            "AND" => Gate::Nary(sigs, NaryType::And),
            "NAND" => Gate::Nary(sigs, NaryType::Nand),
            "OR" => Gate::Nary(sigs, NaryType::Or),
            "NOR" => Gate::Nary(sigs, NaryType::Nor),
            "XOR" => Gate::Nary(sigs, NaryType::Xor),
            "XNOR" => Gate::Nary(sigs, NaryType::Xnor),
            "MUX" => Gate::mux(sigs[0], sigs[1], sigs[2]),
            "MAJ" => Gate::maj(sigs[0], sigs[1], sigs[2]),
            "DFF" | "DFFRSE" => {
                return Err(Error::Unsupported(format!(
                    "sequential element {} at line {}",
                    s.parts[1], s.line
                )));
            }
            _ => {
                if let Some(hex) = s.parts[1].strip_prefix("LUT 0x") {
                    if sigs.len() > MAX_LUT_INPUTS {
                        return Err(parse_error(
                            s.line,
                            format!(
                                "Lut with {} inputs, at most {} are supported",
                                sigs.len(),
                                MAX_LUT_INPUTS
                            ),
                        ));
                    }
                    let lut = Lut::from_hex_string(sigs.len(), hex.trim()).map_err(|_| {
                        parse_error(s.line, format!("invalid truth table {}", s.parts[1]))
                    })?;
                    Gate::lut(sigs.as_ref(), lut)
                } else {
                    return Err(parse_error(
                        s.line,
                        format!("unknown gate type {}", s.parts[1]),
                    ));
                }
            }
        };
        ret.add(gate);
    }
    for (_, o) in outputs {
        ret.add_output(name_to_sig[o]);
    }
    ret.topo_sort()?;
    ret.check();
    Ok(ret)
}

/// Read a network in .bench format, as used by the ISCAS benchmarks
///
/// These files describe the design with simple statements like:
/// ```text
///     # Full adder
///     INPUT(a)
///     INPUT(b)
///     INPUT(cin)
///     OUTPUT(sum)
///     OUTPUT(cout)
///     p = XOR(a, b)
///     sum = XOR(p, cin)
///     g = AND(a, b)
///     t = AND(p, cin)
///     cout = OR(g, t)
/// ```
/// Inputs and outputs keep the order of their declarations.
pub fn read_bench<R: Read>(r: R) -> Result<Network> {
    let mut statements = Vec::new();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = i + 1;
        let l = l?;
        let t = l.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if !t.contains('=') {
            let parts: Vec<_> = t
                .split(&['(', ')'])
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() != 2 {
                return Err(parse_error(line, format!("cannot parse {t}")));
            }
            if ["INPUT", "PINPUT"].contains(&parts[0]) {
                inputs.push((line, parts[1].to_string()));
            } else if ["OUTPUT", "POUTPUT"].contains(&parts[0]) {
                outputs.push((line, parts[1].to_string()));
            } else {
                return Err(parse_error(line, format!("unknown keyword {}", parts[0])));
            }
        } else {
            let parts: Vec<_> = t
                .split(&['=', '(', ',', ')'])
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() < 2 {
                return Err(parse_error(line, format!("cannot parse {t}")));
            }
            statements.push(Statement { line, parts });
        }
    }
    network_from_statements(&statements, &inputs, &outputs)
}

/// Write a network in .bench format
///
/// Inputs are named i0, i1, ...; gates x0, x1, ...; inverted signals get a `_n` suffix and a
/// dedicated NOT statement.
pub fn write_bench<W: Write>(w: &mut W, aig: &Network) -> Result<()> {
    writeln!(w, "# .bench (ISCAS) file")?;
    writeln!(w, "# Generated by adderkit")?;
    for i in 0..aig.nb_inputs() {
        writeln!(w, "INPUT({})", aig.input(i))?;
    }
    writeln!(w)?;
    for i in 0..aig.nb_outputs() {
        writeln!(w, "OUTPUT({})", sig_to_string(&aig.output(i)))?;
    }
    writeln!(w)?;
    for i in 0..aig.nb_nodes() {
        use Gate::*;
        let g = aig.gate(i);
        let rep = g
            .dependencies()
            .iter()
            .map(sig_to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(w, "x{} = ", i)?;
        match g {
            Binary(_, BinaryType::And) | Ternary(_, TernaryType::And) => {
                writeln!(w, "AND({})", rep)?;
            }
            Binary(_, BinaryType::Or) => {
                writeln!(w, "OR({})", rep)?;
            }
            Binary(_, BinaryType::Xor) | Ternary(_, TernaryType::Xor) => {
                writeln!(w, "XOR({})", rep)?;
            }
            Nary(_, tp) => match tp {
                NaryType::And => writeln!(w, "AND({})", rep)?,
                NaryType::Or => writeln!(w, "OR({})", rep)?,
                NaryType::Nand => writeln!(w, "NAND({})", rep)?,
                NaryType::Nor => writeln!(w, "NOR({})", rep)?,
                NaryType::Xor => writeln!(w, "XOR({})", rep)?,
                NaryType::Xnor => writeln!(w, "XNOR({})", rep)?,
            },
            Ternary(_, TernaryType::Mux) => {
                writeln!(w, "MUX({})", rep)?;
            }
            Ternary(_, TernaryType::Maj) => {
                writeln!(w, "MAJ({})", rep)?;
            }
            Buf(s) => {
                if s.is_constant() {
                    writeln!(w, "{}", sig_to_string(s))?;
                } else if s.is_inverted() {
                    writeln!(w, "NOT({})", sig_to_string(&!s))?;
                } else {
                    writeln!(w, "BUF({})", rep)?;
                }
            }
            Lut(lut) => {
                writeln!(w, "LUT 0x{}({})", lut.lut.to_hex_string(), rep)?;
            }
        }
    }

    for s in aig.inverted_signals() {
        writeln!(w, "{}_n = NOT({})", s, s)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_bench, write_bench};
    use crate::error::Error;
    use crate::network::variants::Variant;
    use crate::oracle::FullAdderOracle;
    use crate::sim::SimulatedAdder;

    #[test]
    fn test_read_full_adder() {
        let example = "# Full adder
INPUT(a)
INPUT(b)
INPUT(cin)
OUTPUT(sum)
OUTPUT(cout)

cout = OR(g, t)
t = AND(p, cin)
g = AND(a, b)
sum = XOR(  p, cin )
p   =  XOR(a, b)
";
        let net = read_bench(example.as_bytes()).unwrap();
        assert_eq!(net.nb_inputs(), 3);
        assert_eq!(net.nb_outputs(), 2);
        assert_eq!(net.nb_nodes(), 5);
        let mut dut = SimulatedAdder::new(&net).unwrap();
        assert!(FullAdderOracle::new("bench")
            .run_exhaustive(&mut dut)
            .is_success());
    }

    #[test]
    fn test_basic_read() {
        let example = "INPUT(i0)
INPUT(i1)
OUTPUT(x0)
OUTPUT(x6)
x0 = AND(i0, i1)
x1 = NAND(i0, i1)
x2 = OR(i0, i1)
x3 = NOR(i0, i1)
x4 = XOR(i0, i1)
x5 = BUF(i0)
x6 = NOT(i1)
x7 = gnd
x8 = vdd
x9 = LUT 0x45fc (x0, x1, x2, x3)
";
        let aig = read_bench(example.as_bytes()).unwrap();
        assert_eq!(aig.nb_inputs(), 2);
        assert_eq!(aig.nb_outputs(), 2);
        assert_eq!(aig.nb_nodes(), 10);
    }

    #[test]
    fn test_write_read_variants() {
        for v in Variant::all() {
            let mut buf = Vec::new();
            write_bench(&mut buf, &v.build()).unwrap();
            let net = read_bench(buf.as_slice()).unwrap();
            let mut dut = SimulatedAdder::new(&net).unwrap();
            let summary = FullAdderOracle::new(v.label()).run_exhaustive(&mut dut);
            assert!(summary.is_success(), "{v}: {summary}");
        }
    }

    #[test]
    fn test_errors() {
        let undefined = "INPUT(a)\nOUTPUT(y)\ny = AND(a, b)\n";
        assert!(matches!(
            read_bench(undefined.as_bytes()),
            Err(Error::Parse { line: 3, .. })
        ));
        let twice = "INPUT(a)\nINPUT(a)\n";
        assert!(matches!(
            read_bench(twice.as_bytes()),
            Err(Error::Parse { line: 2, .. })
        ));
        let keyword = "WIRE(a)\n";
        assert!(matches!(
            read_bench(keyword.as_bytes()),
            Err(Error::Parse { line: 1, .. })
        ));
        let arity = "INPUT(a)\nOUTPUT(y)\ny = NOT(a, a)\n";
        assert!(matches!(
            read_bench(arity.as_bytes()),
            Err(Error::Parse { line: 3, .. })
        ));
        let seq = "INPUT(a)\nOUTPUT(y)\ny = DFF(a)\n";
        assert!(matches!(
            read_bench(seq.as_bytes()),
            Err(Error::Unsupported(_))
        ));
        let names: Vec<String> = (0..40).map(|i| format!("i{i}")).collect();
        let wide = format!(
            "{}\nOUTPUT(y)\ny = LUT 0x0 ({})\n",
            names
                .iter()
                .map(|n| format!("INPUT({n})"))
                .collect::<Vec<_>>()
                .join("\n"),
            names.join(", ")
        );
        assert!(matches!(
            read_bench(wide.as_bytes()),
            Err(Error::Parse { line: 42, .. })
        ));
        let looped = "INPUT(a)\nOUTPUT(y)\ny = AND(a, z)\nz = AND(a, y)\n";
        assert!(matches!(
            read_bench(looped.as_bytes()),
            Err(Error::Unsupported(_))
        ));
    }
}
