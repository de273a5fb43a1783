//! The console boundary: prompts, input parsing and result reporting.
//!
//! The session is generic over its reader and writer so the interaction can
//! be tested against in-memory buffers. Parse failures never reach the
//! solver; a rejected request is reported and the user is prompted again.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::{Solution, SolverFloat};

/// One starting point and accuracy, consumed by exactly one solver run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolverRequest {
    pub x1: f64,
    pub x2: f64,
    pub accuracy: f64,
}

/// Reasons a submitted request is rejected at the console boundary.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum InputError {
    /// One of the entered values did not parse as a float
    #[error("wrong input")]
    Malformed,
    /// The accuracy parsed but cannot drive a convergence test
    #[error("accuracy must be a finite, non-negative number")]
    InvalidAccuracy,
}

/// A line-oriented console session.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.output, "Current function: x1^2 - x2")
    }

    /// Print `prompt` and read one line. Returns `None` once the input
    /// stream is exhausted.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Read one request: three prompted values, parsed together.
    ///
    /// All three lines are consumed before any of them is validated, so a
    /// typo in the first value does not leave the remaining answers queued
    /// up as the next request. Invalid submissions are reported and the
    /// prompts repeat. Returns `None` on end of input.
    pub fn read_request(&mut self) -> io::Result<Option<SolverRequest>> {
        loop {
            let Some(x1) = self.prompt_line("Enter X1: ")? else {
                return Ok(None);
            };
            let Some(x2) = self.prompt_line("Enter X2: ")? else {
                return Ok(None);
            };
            let Some(accuracy) = self.prompt_line("Enter Accuracy: ")? else {
                return Ok(None);
            };

            match parse_request(&x1, &x2, &accuracy) {
                Ok(request) => return Ok(Some(request)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Ask whether to keep the session open.
    ///
    /// Any answer other than `n`/`N` (case-insensitive, any line ending)
    /// continues. End of input stops the session.
    pub fn should_continue(&mut self) -> io::Result<bool> {
        match self.prompt_line("Continue? [y/n]: ")? {
            Some(answer) => Ok(!answer.trim().eq_ignore_ascii_case("n")),
            None => Ok(false),
        }
    }

    /// Report the final point of a finished run.
    pub fn report_best<F>(&mut self, method: &str, solution: &Solution<F>) -> io::Result<()>
    where
        F: SolverFloat + Copy,
    {
        let label = solution.label();
        let best = solution.final_iterate();
        writeln!(self.output, "----Best results of {method}-----")?;
        writeln!(
            self.output,
            "{method} with starting point{label} X1 and X2: {best}"
        )?;
        writeln!(
            self.output,
            "{method} with starting point{label} F: {}",
            best.value()
        )?;
        writeln!(
            self.output,
            "{method} with starting point{label} K: {}",
            solution.iterations()
        )?;
        Ok(())
    }

    pub fn trace_written(&mut self, path: &Path) -> io::Result<()> {
        writeln!(
            self.output,
            "All intermediate results have been successfully written to {}\n",
            path.display()
        )
    }

    pub fn trace_failed(&mut self, err: &io::Error) -> io::Result<()> {
        writeln!(self.output, "Failed to write intermediate results: {err}")
    }

    pub fn solver_failed(&mut self, method: &str, err: &dyn std::error::Error) -> io::Result<()> {
        writeln!(self.output, "{method} aborted: {err}")
    }
}

fn parse_value(line: &str) -> Result<f64, InputError> {
    line.trim_end_matches(['\r', '\n'])
        .parse()
        .map_err(|_| InputError::Malformed)
}

fn parse_request(x1: &str, x2: &str, accuracy: &str) -> Result<SolverRequest, InputError> {
    let request = SolverRequest {
        x1: parse_value(x1)?,
        x2: parse_value(x2)?,
        accuracy: parse_value(accuracy)?,
    };
    if !request.accuracy.is_finite() || request.accuracy < 0.0 {
        return Err(InputError::InvalidAccuracy);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cause, Iterate, Quadratic, Trajectory};

    fn session(input: &str) -> Session<&[u8], Vec<u8>> {
        Session::new(input.as_bytes(), Vec::new())
    }

    fn output(session: Session<&[u8], Vec<u8>>) -> String {
        String::from_utf8(session.output).unwrap()
    }

    #[test]
    fn reads_a_well_formed_request() {
        let mut session = session("6\n0\n0.01\n");
        let request = session.read_request().unwrap().unwrap();
        assert_eq!(
            request,
            SolverRequest {
                x1: 6.0,
                x2: 0.0,
                accuracy: 0.01
            }
        );
        assert_eq!(
            output(session),
            "Enter X1: Enter X2: Enter Accuracy: "
        );
    }

    #[test]
    fn accepts_windows_line_endings() {
        let mut session = session("6\r\n0.5\r\n0.01\r\n");
        let request = session.read_request().unwrap().unwrap();
        assert_eq!(request.x2, 0.5);
    }

    #[test]
    fn rejects_garbage_and_prompts_again() {
        let mut session = session("abc\n0\n0.01\n1\n2\n0.5\n");
        let request = session.read_request().unwrap().unwrap();
        assert_eq!(
            request,
            SolverRequest {
                x1: 1.0,
                x2: 2.0,
                accuracy: 0.5
            }
        );
        assert!(output(session).contains("wrong input"));
    }

    #[test]
    fn rejects_negative_and_non_finite_accuracy() {
        let mut session = session("1\n1\n-0.5\n1\n1\nnan\n1\n1\n0.5\n");
        let request = session.read_request().unwrap().unwrap();
        assert_eq!(request.accuracy, 0.5);
        assert_eq!(
            output(session)
                .matches("accuracy must be a finite, non-negative number")
                .count(),
            2
        );
    }

    #[test]
    fn returns_none_once_input_is_exhausted() {
        let mut session = session("6\n0\n");
        assert_eq!(session.read_request().unwrap(), None);
    }

    #[test]
    fn continue_prompt_only_stops_on_n() {
        for (answer, expected) in [
            ("n\r\n", false),
            ("N\r\n", false),
            ("n\n", false),
            ("N\n", false),
            ("y\n", true),
            ("anything else\n", true),
            ("\n", true),
        ] {
            let mut session = session(answer);
            assert_eq!(session.should_continue().unwrap(), expected, "{answer:?}");
        }

        let mut session = session("");
        assert!(!session.should_continue().unwrap());
    }

    #[test]
    fn reports_the_final_point_of_a_run() {
        let mut trajectory = Trajectory::new();
        trajectory.push(Iterate::evaluated(&Quadratic, 6.0, 0.0));
        trajectory.push(Iterate::evaluated(&Quadratic, 3.0, 1.5));
        let solution = Solution::new(trajectory, Cause::Converged);

        let mut session = session("");
        session.report_best("Gradient Projection method", &solution).unwrap();

        let report = output(session);
        assert_eq!(
            report,
            "----Best results of Gradient Projection method-----\n\
             Gradient Projection method with starting point(6,0) X1 and X2: (3, 1.5)\n\
             Gradient Projection method with starting point(6,0) F: 7.5\n\
             Gradient Projection method with starting point(6,0) K: 1\n"
        );
    }
}
