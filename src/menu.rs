//! Interactive selection prompts.
//!
//! Each prompt re-asks until the answer parses; end of input is an error.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use u_procsim::pool::Scenario;
use u_procsim::scheduler::Policy;
use u_procsim::workload::parse_seed;
use u_procsim::SimResult;

fn prompt_until<R, W, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> SimResult<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a valid selection was made");
        }
        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(output, "{err}, try again.")?,
        }
    }
}

/// Asks for a processor scenario (1-4).
pub fn select_scenario<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Scenario> {
    writeln!(output, "Processor scenarios:")?;
    writeln!(output, "  1) 4 processors, 3 GHz, 8 memory units each")?;
    for scenario in Scenario::ALL.into_iter().filter(|s| !s.is_implemented()) {
        writeln!(output, "  {}) reserved (not implemented)", scenario.number())?;
    }
    prompt_until(input, output, "Scenario [1-4]: ", |s| s.parse())
}

/// Asks for a scheduling policy by selector name.
pub fn select_policy<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Policy> {
    writeln!(output, "Scheduling algorithms:")?;
    for policy in Policy::ALL {
        let note = if policy.is_implemented() {
            ""
        } else {
            " (not implemented)"
        };
        writeln!(output, "  {:<4} {}{}", policy.name(), policy.description(), note)?;
    }
    prompt_until(input, output, "Algorithm [FIFO/SJF/RR/ML]: ", |s| s.parse())
}

/// Asks for a workload seed.
pub fn select_seed<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<u64> {
    prompt_until(input, output, "Seed: ", parse_seed)
}
