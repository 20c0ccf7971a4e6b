#![forbid(unsafe_code)]

//! Interactive target selection.

use monitor::{Error, ProcessGroup, Selector, Target};
use std::io::{BufRead, Write};

/// Lists the discovered groups and asks the operator to pick one. Groups
/// with several members get a second question for the pid.
///
/// An empty answer, `q` or end of input declines.
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn choose(&mut self, prompt: &str, count: usize) -> Result<Option<usize>, Error> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=count).contains(&choice) => return Ok(Some(choice - 1)),
                _ => writeln!(self.output, "Please enter a number between 1 and {count}.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Selector for PromptSelector<R, W> {
    fn select(&mut self, groups: &[ProcessGroup]) -> Result<Option<Target>, Error> {
        writeln!(self.output, "Matching processes:")?;
        for (index, group) in groups.iter().enumerate() {
            let pids: Vec<String> = group.members.iter().map(ToString::to_string).collect();
            writeln!(
                self.output,
                "{}) {} [{}]",
                index + 1,
                group.name,
                pids.join(", ")
            )?;
        }

        let Some(choice) = self.choose("Select a process group (empty or q to quit): ", groups.len())?
        else {
            return Ok(None);
        };
        let group = &groups[choice];

        let pid = match group.members.as_slice() {
            [] => return Ok(None),
            [pid] => *pid,
            members => {
                for (index, pid) in members.iter().enumerate() {
                    writeln!(self.output, "  {}) PID {}", index + 1, pid)?;
                }
                match self.choose("Select a process (empty or q to quit): ", members.len())? {
                    Some(choice) => members[choice],
                    None => return Ok(None),
                }
            }
        };

        Ok(Some(Target {
            pid,
            name: group.name.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor::Pid;
    use std::io::Cursor;

    fn groups() -> Vec<ProcessGroup> {
        vec![
            ProcessGroup {
                name: "sampled-target".into(),
                members: vec![Pid::new(100).unwrap(), Pid::new(205).unwrap()],
            },
            ProcessGroup {
                name: "sshd".into(),
                members: vec![Pid::new(7).unwrap()],
            },
        ]
    }

    fn run(input: &str) -> (Option<Target>, String) {
        let mut output = Vec::new();
        let target = PromptSelector::new(Cursor::new(input), &mut output)
            .select(&groups())
            .unwrap();
        (target, String::from_utf8(output).unwrap())
    }

    #[test]
    fn picks_member_of_multi_member_group() {
        let (target, output) = run("1\n2\n");
        assert_eq!(
            target,
            Some(Target {
                pid: Pid::new(205).unwrap(),
                name: "sampled-target".into(),
            })
        );
        assert!(output.contains("1) sampled-target [100, 205]"));
        assert!(output.contains("2) sshd [7]"));
        assert!(output.contains("  2) PID 205"));
    }

    #[test]
    fn single_member_group_skips_second_question() {
        let (target, output) = run("2\n");
        assert_eq!(target.map(|t| t.pid), Pid::new(7));
        assert!(!output.contains("Select a process ("));
    }

    #[test]
    fn retries_out_of_range_answers() {
        let (target, output) = run("9\nabc\n2\n");
        assert_eq!(target.map(|t| t.pid), Pid::new(7));
        assert_eq!(output.matches("Please enter a number between 1 and 2.").count(), 2);
    }

    #[test]
    fn declines_on_quit_empty_or_eof() {
        assert_eq!(run("q\n").0, None);
        assert_eq!(run("\n").0, None);
        assert_eq!(run("").0, None);
        assert_eq!(run("1\nQ\n").0, None);
    }
}
