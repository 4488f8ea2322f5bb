use crate::problem::{Clause, Literal, MalformedProblem, Problem};
use std::fmt::{self, Display, Formatter};
use std::io::Read;

/// Reads a problem from the whitespace-separated integer format:
/// `N K M` followed by `K` groups of `M` signed non-zero literals.
/// Tokens after the last clause are ignored.
pub fn read<R: Read>(mut reader: R) -> Result<Problem, ReadError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let mut tokens = input.split_whitespace();

    let num_variables = next_integer(&mut tokens, "the number of propositions")?;
    if num_variables < 1 {
        return Err(ReadError::Malformed("small number of propositions".into()));
    }
    let num_clauses = next_integer(&mut tokens, "the number of clauses")?;
    if num_clauses < 1 {
        return Err(ReadError::Malformed("low number of clauses".into()));
    }
    let clause_width = next_integer(&mut tokens, "the number of propositions per clause")?;
    if clause_width < 2 {
        return Err(ReadError::Malformed(
            "low number of propositions per clause".into(),
        ));
    }

    let mut clauses = Vec::with_capacity(num_clauses as usize);
    for c in 0..num_clauses {
        let mut literals = Vec::with_capacity(clause_width as usize);
        for l in 0..clause_width {
            let position = format!("the #{} proposition of the #{} clause", l + 1, c + 1);
            let encoded = next_integer(&mut tokens, &position)?;
            let literal = Literal::from_signed(encoded).ok_or_else(|| {
                ReadError::Malformed(format!("wrong value for {}", position))
            })?;
            literals.push(literal);
        }
        clauses.push(Clause::new(literals));
    }

    let problem = Problem::new(num_variables as usize, clause_width as usize, clauses)?;
    Ok(problem)
}

fn next_integer<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<i64, ReadError> {
    tokens
        .next()
        .and_then(|t| t.parse::<i64>().ok())
        .ok_or_else(|| ReadError::Malformed(format!("cannot read {}", what)))
}

#[derive(Debug)]
pub enum ReadError {
    Io(std::io::Error),
    Malformed(String),
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<MalformedProblem> for ReadError {
    fn from(e: MalformedProblem) -> Self {
        Self::Malformed(e.0)
    }
}

impl Display for ReadError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            ReadError::Io(e) => write!(f, "{}", e),
            ReadError::Malformed(reason) => f.write_str(reason),
        }
    }
}
