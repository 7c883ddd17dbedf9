use std::{fs::File, io::BufRead, io::BufReader, path::Path};

use crate::aig::error::{BodyError, ParserError};
use crate::aig::{Aig, Literal, Result};

fn read_lit(s: &str) -> std::result::Result<Literal, BodyError> {
    s.parse::<Literal>()
        .map_err(|_| BodyError::NegativeIndex(s.to_string()))
}

/// Reads one mandatory line into `line`, failing on I/O errors and on a
/// premature end of file. The trailing newline is kept.
fn next_line(reader: &mut impl BufRead, line: &mut String) -> std::result::Result<(), ParserError> {
    line.clear();
    let n = reader
        .read_line(line)
        .map_err(|e| ParserError::Io(e.to_string()))?;
    if n == 0 || line.trim().is_empty() {
        return Err(ParserError::UnexpectedEof);
    }
    Ok(())
}

/// Which body encoding follows the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Ascii,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    format: Format,
    m: u64,
    i: u64,
    l: u64,
    o: u64,
    a: u64,
}

impl TryFrom<&str> for Header {
    type Error = ParserError;

    fn try_from(line: &str) -> std::result::Result<Self, Self::Error> {
        let tokens = line.trim().split_whitespace().collect::<Vec<&str>>();

        if tokens.len() != 6 {
            return Err(ParserError::HeaderMalformed(
                "expected `aag|aig M I L O A`".to_string(),
            ));
        }

        let format = match tokens[0] {
            "aag" => Format::Ascii,
            "aig" => Format::Binary,
            other => {
                return Err(ParserError::HeaderMalformed(
                    "unknown magic token ".to_string() + other,
                ));
            }
        };

        let mut counts = [0u64; 5];
        for (count, token) in counts.iter_mut().zip(&tokens[1..]) {
            *count = token
                .parse::<u64>()
                .map_err(|_| ParserError::HeaderMalformed("invalid count ".to_string() + token))?;
        }
        let [m, i, l, o, a] = counts;

        if l != 0 {
            return Err(ParserError::LatchesUnsupported);
        }
        if m != i + l + a {
            return Err(ParserError::CountsInconsistent { m, i, l, a });
        }

        Ok(Header { format, m, i, l, o, a })
    }
}

/// Reads the `O` output lines, one literal each.
///
/// Shared by both formats: the binary format keeps its output section in
/// ASCII. A literal seen twice or referencing past M is rejected.
fn read_outputs(reader: &mut impl BufRead, header: Header) -> Result<Vec<Literal>> {
    let mut outputs = Vec::with_capacity(header.o as usize);
    let mut line = String::new();
    for _ in 0..header.o {
        next_line(reader, &mut line)?;
        let lit = read_lit(line.trim()).map_err(ParserError::Body)?;
        if lit >> 1 > header.m {
            return Err(ParserError::Body(BodyError::LiteralRange {
                literal: lit,
                by: "the output list".to_string(),
            })
            .into());
        }
        if outputs.contains(&lit) {
            return Err(ParserError::Body(BodyError::DuplicateOutput(lit)).into());
        }
        outputs.push(lit);
    }
    Ok(outputs)
}

/// Checks the structural rules every gate triple must satisfy:
/// the greater fanin first, both fanins strictly below the gate's own label.
fn check_gate(label: Literal, lit1: Literal, lit2: Literal) -> std::result::Result<(), BodyError> {
    if lit1 < lit2 {
        return Err(BodyError::InputOrderViolation {
            label,
            left: lit1,
            right: lit2,
        });
    }
    if lit1 >= label {
        return Err(BodyError::LiteralRange {
            literal: lit1,
            by: "gate ".to_string() + &label.to_string(),
        });
    }
    Ok(())
}

/// Parser for the ASCII body (`aag`).
mod ascii {
    use super::{check_gate, next_line, read_lit, Header};
    use crate::aig::error::{BodyError, ParserError};
    use crate::aig::{Literal, Result};
    use std::io::BufRead;

    /// The `i`-th input line must carry exactly the label `2 * (i + 1)`.
    fn read_input(line: &str, index: u64) -> std::result::Result<(), BodyError> {
        let label = read_lit(line.trim())?;
        if label != 2 * (index + 1) {
            return Err(BodyError::WrongInputLabel { index: index + 1, label });
        }
        Ok(())
    }

    fn read_inputs(reader: &mut impl BufRead, header: Header) -> Result<()> {
        let mut line = String::new();
        for index in 0..header.i {
            next_line(reader, &mut line)?;
            read_input(&line, index).map_err(ParserError::Body)?;
        }
        Ok(())
    }

    /// A gate line `lit lit1 lit2`. The `k`-th gate must be labelled
    /// `2 * (I + k + 1)`.
    fn read_gate(
        line: &str,
        index: u64,
        header: Header,
    ) -> std::result::Result<(Literal, Literal, Literal), BodyError> {
        let mut tokens = line.trim().split_whitespace();
        let mut next = || tokens.next().map(read_lit).unwrap_or_else(|| {
            Err(BodyError::NegativeIndex("missing gate token".to_string()))
        });
        let label = next()?;
        let lit1 = next()?;
        let lit2 = next()?;

        if label != 2 * (header.i + index + 1) {
            return Err(BodyError::WrongGateLabel {
                index: header.i + index + 1,
                label,
            });
        }
        check_gate(label, lit1, lit2)?;
        Ok((label, lit1, lit2))
    }

    fn read_gates(
        reader: &mut impl BufRead,
        header: Header,
    ) -> Result<Vec<(Literal, Literal, Literal)>> {
        let mut gates = Vec::with_capacity(header.a as usize);
        let mut line = String::new();
        for index in 0..header.a {
            next_line(reader, &mut line)?;
            gates.push(read_gate(&line, index, header).map_err(ParserError::Body)?);
        }
        Ok(gates)
    }

    pub(super) fn parse_body(
        reader: &mut impl BufRead,
        header: Header,
    ) -> Result<(Vec<Literal>, Vec<(Literal, Literal, Literal)>)> {
        read_inputs(reader, header)?;
        let outputs = super::read_outputs(reader, header)?;
        let gates = read_gates(reader, header)?;
        Ok((outputs, gates))
    }

}

/// Parser for the binary body (`aig`).
///
/// Outputs stay ASCII; the gate section packs, for each gate in label
/// order, two deltas in the AIGER variable-length encoding: 7-bit groups,
/// lowest group first, continuation bit 0x80.
mod bin {
    use super::{check_gate, Header};
    use crate::aig::error::{BodyError, ParserError};
    use crate::aig::{Literal, Result};
    use std::io::BufRead;

    fn next_byte(buf: &[u8], offset: &mut usize) -> std::result::Result<u8, ParserError> {
        if *offset >= buf.len() {
            return Err(ParserError::UnexpectedEof);
        }
        let byte = buf[*offset];
        *offset += 1;
        Ok(byte)
    }

    pub(super) fn decode_delta(
        buf: &[u8],
        offset: &mut usize,
        label: Literal,
    ) -> Result<u64> {
        let mut x = 0u64;
        let mut shift = 0u32;

        loop {
            let byte = next_byte(buf, offset)?;
            if shift >= 64 {
                return Err(ParserError::Body(BodyError::LiteralRange {
                    literal: label,
                    by: "an oversized gate delta".to_string(),
                })
                .into());
            }
            x |= ((byte & 0x7f) as u64) << shift;
            shift += 7;
            if byte & 0x80 == 0 {
                return Ok(x);
            }
        }
    }

    fn read_gates(
        reader: &mut impl BufRead,
        header: Header,
    ) -> Result<Vec<(Literal, Literal, Literal)>> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| ParserError::Io(e.to_string()))?;

        let mut gates = Vec::with_capacity(header.a as usize);
        let mut offset = 0;
        for index in 0..header.a {
            let label = 2 * (header.i + index + 1);
            let delta0 = decode_delta(&buf, &mut offset, label)?;
            let delta1 = decode_delta(&buf, &mut offset, label)?;

            let out_of_range = |literal| {
                ParserError::Body(BodyError::LiteralRange {
                    literal,
                    by: "gate ".to_string() + &label.to_string(),
                })
            };
            let lit1 = label
                .checked_sub(delta0)
                .ok_or_else(|| out_of_range(label))?;
            let lit2 = lit1
                .checked_sub(delta1)
                .ok_or_else(|| out_of_range(lit1))?;

            check_gate(label, lit1, lit2).map_err(ParserError::Body)?;
            gates.push((label, lit1, lit2));
        }
        Ok(gates)
    }

    pub(super) fn parse_body(
        reader: &mut impl BufRead,
        header: Header,
    ) -> Result<(Vec<Literal>, Vec<(Literal, Literal, Literal)>)> {
        let outputs = super::read_outputs(reader, header)?;
        let gates = read_gates(reader, header)?;
        Ok((outputs, gates))
    }

}

impl Aig {
    /// Creates an AIG from any buffered AIGER source.
    ///
    /// The header's magic token (`aag` or `aig`) selects the body parser;
    /// the file name plays no role. Anything after the declared records
    /// (symbol table, comments) is ignored.
    pub fn from_reader(mut reader: impl BufRead) -> Result<Self> {
        let mut line = String::new();
        next_line(&mut reader, &mut line)?;
        let header = Header::try_from(line.as_str())?;

        let (outputs, gates) = match header.format {
            Format::Ascii => ascii::parse_body(&mut reader, header)?,
            Format::Binary => bin::parse_body(&mut reader, header)?,
        };

        Aig::build(header.i as usize, header.m as usize, outputs, gates)
    }

    /// Creates an AIG from an AIGER file, in the ASCII or binary format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path.as_ref()).map_err(|e| ParserError::Io(e.to_string()))?;
        Aig::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aig::{AigError, Child, VertexKind};

    #[test]
    fn read_lit_test() {
        assert!(read_lit("").is_err());
        assert!(read_lit(" 2").is_err());
        assert!(read_lit("-5").is_err());
        assert!(read_lit("z").is_err());

        assert_eq!(read_lit("42").unwrap(), 42);
        assert_eq!(read_lit("0").unwrap(), 0);
    }

    #[test]
    fn header_try_from_test() {
        assert!(Header::try_from("").is_err());
        assert!(Header::try_from("aag 0 0 0 0").is_err());
        assert!(Header::try_from("aag 0 0 0 0 0 0").is_err());
        assert!(Header::try_from("xyz 0 0 0 0 0").is_err());
        assert!(Header::try_from("aag 1 1 -1 1 1").is_err());

        assert_eq!(
            Header::try_from("   aag 0 0 0 0 0 ").unwrap(),
            Header {
                format: Format::Ascii,
                m: 0,
                i: 0,
                l: 0,
                o: 0,
                a: 0
            }
        );
        assert_eq!(
            Header::try_from("aig 5 2 0 1 3").unwrap(),
            Header {
                format: Format::Binary,
                m: 5,
                i: 2,
                l: 0,
                o: 1,
                a: 3
            }
        );

        assert!(matches!(
            Header::try_from("aag 3 2 1 1 0"),
            Err(ParserError::LatchesUnsupported)
        ));
        assert!(matches!(
            Header::try_from("aag 4 2 0 1 1"),
            Err(ParserError::CountsInconsistent { m: 4, i: 2, l: 0, a: 1 })
        ));
    }

    #[test]
    fn from_reader_ascii() {
        let src = "aag 3 2 0 1 1\n2\n4\n6\n6 4 2\n";
        let aig = Aig::from_reader(src.as_bytes()).unwrap();
        assert_eq!(aig.num_vertices(), 3);
        assert_eq!(aig.num_inputs(), 2);
        assert_eq!(aig.outputs(), &[6]);
    }

    #[test]
    fn from_reader_ignores_trailing_sections() {
        let src = "aag 3 2 0 1 1\n2\n4\n6\n6 4 2\ni0 a\ni1 b\nc\na comment\n";
        assert!(Aig::from_reader(src.as_bytes()).is_ok());
    }

    #[test]
    fn from_reader_binary() {
        // Same circuit as `from_reader_ascii`: 6 = 4 & 2 is the delta
        // pair (2, 2).
        let mut src = b"aig 3 2 0 1 1\n6\n".to_vec();
        src.extend([0x02, 0x02]);
        let aig = Aig::from_reader(src.as_slice()).unwrap();
        assert_eq!(aig.num_vertices(), 3);
        assert_eq!(aig.outputs(), &[6]);
        assert_eq!(
            aig.vertex(2).kind(),
            VertexKind::And {
                left: Child::Vertex(1),
                right: Child::Vertex(0)
            }
        );
    }

    #[test]
    fn from_reader_binary_truncated() {
        let mut src = b"aig 3 2 0 1 1\n6\n".to_vec();
        src.extend([0x02]);
        assert!(matches!(
            Aig::from_reader(src.as_slice()),
            Err(AigError::Parser(ParserError::UnexpectedEof))
        ));
    }

    #[test]
    fn from_reader_rejects_wrong_input_label() {
        let src = "aag 2 2 0 1 0\n2\n3\n";
        let err = Aig::from_reader(src.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("label of an input"));
    }

    #[test]
    fn from_reader_rejects_duplicate_output() {
        let src = "aag 3 2 0 2 1\n2\n4\n6\n6\n6 4 2\n";
        assert!(matches!(
            Aig::from_reader(src.as_bytes()),
            Err(AigError::Parser(ParserError::Body(BodyError::DuplicateOutput(6))))
        ));
    }

    #[test]
    fn from_reader_truncated_file() {
        let src = "aag 3 2 0 1 1\n2\n4\n";
        assert!(matches!(
            Aig::from_reader(src.as_bytes()),
            Err(AigError::Parser(ParserError::UnexpectedEof))
        ));
    }
}
