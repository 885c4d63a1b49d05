use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Yes for this file and every later one in the run.
    All,
}

/// Interactive y/n/a confirmation over any line-oriented input.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until we get y, n or a. Closed input counts as "no".
    pub fn ask(&mut self, artist: &str, title: &str) -> io::Result<Answer> {
        loop {
            write!(self.output, "Update lyrics for '{artist} - {title}'? [y/n/a] ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(Answer::No);
            }

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(Answer::Yes),
                "n" => return Ok(Answer::No),
                "a" => return Ok(Answer::All),
                _ => writeln!(self.output, "Please type y (yes), n (no), or a (yes to all).")?,
            }
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
