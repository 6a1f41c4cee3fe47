//! A line-oriented command language for driving a [`Tree`] by hand or from a file.
//!
//! Each line holds one command followed by its arguments, separated by whitespace. Everything from
//! a `#` to the end of the line is a comment, and lines left blank are skipped. Command names are
//! case-insensitive.
//!
//! ```text
//! insert 50 30 70 20 40 60 80
//! range 35 65      # prints "40 50 60"
//! kth 3            # prints "60"
//! delete 50
//! inorder          # prints "20 30 40 60 70 80"
//! ```
//!
//! # Examples
//!
//! ```
//! use bst_lab::script::Session;
//!
//! let mut session = Session::new(Vec::new());
//! session.run_script("insert 5 3 8\nsearch 3\nkth 4\n".as_bytes()).unwrap();
//!
//! assert_eq!(session.into_inner(), b"true\nnot found\n");
//! ```

use std::io::{BufRead, Write};
use std::str::SplitWhitespace;

use tracing::debug;

use crate::error::{LabError, Result};
use crate::ordered::Tree;

/// What a [`Session`] writes when a query has no answer.
pub const NOT_FOUND: &str = "not found";

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `insert K [K ...]`
    Insert(Vec<i32>),
    /// `delete K [K ...]`
    Delete(Vec<i32>),
    /// `search K`
    Search(i32),
    /// `empty`
    Empty,
    /// `len`
    Len,
    /// `inorder`
    Inorder,
    /// `preorder`
    Preorder,
    /// `postorder`
    Postorder,
    /// `range LOW HIGH`
    Range(i32, i32),
    /// `kth K`. Ranks below 1 are accepted and never found.
    Kth(i64),
    /// `min`
    Min,
    /// `max`
    Max,
    /// `height`
    Height,
    /// `clear`
    Clear,
}

impl Command {
    /// Parses one line, ignoring any `#` comment. Returns `Ok(None)` when nothing but whitespace
    /// and comment is left.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_lab::script::Command;
    ///
    /// assert_eq!(Command::parse("RANGE 1 9").unwrap(), Some(Command::Range(1, 9)));
    /// assert_eq!(Command::parse("  # just a note").unwrap(), None);
    /// assert_eq!(Command::parse("kth 3  # third largest").unwrap(), Some(Command::Kth(3)));
    /// assert!(Command::parse("range 1").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.split_once('#').map_or(line, |(code, _)| code);
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let name = name.to_ascii_lowercase();
        let mut args = Args {
            command: &name,
            tokens,
        };

        let command = match name.as_str() {
            "insert" => Self::Insert(args.keys()?),
            "delete" => Self::Delete(args.keys()?),
            "search" => Self::Search(args.key("a key")?),
            "empty" => Self::Empty,
            "len" => Self::Len,
            "inorder" => Self::Inorder,
            "preorder" => Self::Preorder,
            "postorder" => Self::Postorder,
            "range" => {
                let low = args.key("a low and a high key")?;
                let high = args.key("a high key")?;
                Self::Range(low, high)
            }
            "kth" => Self::Kth(args.rank()?),
            "min" => Self::Min,
            "max" => Self::Max,
            "height" => Self::Height,
            "clear" => Self::Clear,
            _ => return Err(LabError::UnknownCommand(args.command.to_owned())),
        };
        args.finish()?;
        Ok(Some(command))
    }
}

/// The arguments left on a line after its command name.
struct Args<'a> {
    command: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next(&mut self, expected: &'static str) -> Result<&'a str> {
        self.tokens.next().ok_or_else(|| LabError::MissingArgument {
            command: self.command.to_owned(),
            expected,
        })
    }

    fn key(&mut self, expected: &'static str) -> Result<i32> {
        parse_key(self.next(expected)?)
    }

    /// At least one key, then everything else on the line as keys.
    fn keys(&mut self) -> Result<Vec<i32>> {
        let mut keys = vec![self.key("at least one key")?];
        for token in self.tokens.by_ref() {
            keys.push(parse_key(token)?);
        }
        Ok(keys)
    }

    fn rank(&mut self) -> Result<i64> {
        let token = self.next("a rank")?;
        token.parse().map_err(|source| LabError::InvalidRank {
            token: token.to_owned(),
            source,
        })
    }

    fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(token) => Err(LabError::TrailingArgument {
                command: self.command.to_owned(),
                token: token.to_owned(),
            }),
        }
    }
}

fn parse_key(token: &str) -> Result<i32> {
    token.parse().map_err(|source| LabError::InvalidKey {
        token: token.to_owned(),
        source,
    })
}

/// A tree plus somewhere to write query answers. Each answering command writes exactly one line.
#[derive(Debug)]
pub struct Session<W> {
    tree: Tree,
    out: W,
    echo: bool,
}

impl<W: Write> Session<W> {
    /// Starts a session on an empty tree.
    pub fn new(out: W) -> Self {
        Self {
            tree: Tree::new(),
            out,
            echo: false,
        }
    }

    /// When `echo` is set, every command is written back as `> command` before its output.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The tree as the commands so far have left it.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Ends the session, handing back the output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs a single command.
    pub fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Insert(keys) => self.tree.extend(keys.iter().copied()),
            Command::Delete(keys) => {
                for &key in keys {
                    self.tree.delete(key);
                }
            }
            Command::Search(key) => writeln!(self.out, "{}", self.tree.search(*key))?,
            Command::Empty => writeln!(self.out, "{}", self.tree.is_empty())?,
            Command::Len => writeln!(self.out, "{}", self.tree.len())?,
            Command::Inorder => {
                let mut keys = Vec::with_capacity(self.tree.len());
                self.tree.inorder(|key| keys.push(key));
                self.write_keys(&keys)?;
            }
            Command::Preorder => {
                let mut keys = Vec::with_capacity(self.tree.len());
                self.tree.preorder(|key| keys.push(key));
                self.write_keys(&keys)?;
            }
            Command::Postorder => {
                let mut keys = Vec::with_capacity(self.tree.len());
                self.tree.postorder(|key| keys.push(key));
                self.write_keys(&keys)?;
            }
            Command::Range(low, high) => {
                let mut keys = Vec::new();
                self.tree.range(*low, *high, |key| keys.push(key));
                self.write_keys(&keys)?;
            }
            Command::Kth(k) => {
                let found = usize::try_from(*k)
                    .ok()
                    .and_then(|k| self.tree.kth_largest(k));
                self.write_found(found)?;
            }
            Command::Min => self.write_found(self.tree.min())?,
            Command::Max => self.write_found(self.tree.max())?,
            Command::Height => writeln!(self.out, "{}", self.tree.height())?,
            Command::Clear => self.tree = Tree::new(),
        }
        Ok(())
    }

    /// Parses and runs one line. Blank and comment lines do nothing.
    pub fn run_line(&mut self, line: &str) -> Result<()> {
        let Some(command) = Command::parse(line)? else {
            return Ok(());
        };
        if self.echo {
            writeln!(self.out, "> {}", line.trim())?;
        }
        debug!(?command, "running command");
        self.execute(&command)
    }

    /// Runs every line of `input`, stopping at the first line that fails. The error carries that
    /// line's number.
    pub fn run_script<R: BufRead>(&mut self, input: R) -> Result<()> {
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            self.run_line(&line).map_err(|source| LabError::Line {
                line: index + 1,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    fn write_keys(&mut self, keys: &[i32]) -> Result<()> {
        let line = keys
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn write_found(&mut self, found: Option<i32>) -> Result<()> {
        match found {
            Some(key) => writeln!(self.out, "{}", key)?,
            None => writeln!(self.out, "{}", NOT_FOUND)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> String {
        let mut session = Session::new(Vec::new());
        session.run_script(script.as_bytes()).unwrap();
        String::from_utf8(session.into_inner()).unwrap()
    }

    #[test]
    fn parses_every_command() {
        let cases = [
            ("insert 1 -2 3", Command::Insert(vec![1, -2, 3])),
            ("delete 4", Command::Delete(vec![4])),
            ("search 5", Command::Search(5)),
            ("empty", Command::Empty),
            ("len", Command::Len),
            ("inorder", Command::Inorder),
            ("preorder", Command::Preorder),
            ("postorder", Command::Postorder),
            ("range 6 7", Command::Range(6, 7)),
            ("kth -1", Command::Kth(-1)),
            ("min", Command::Min),
            ("max", Command::Max),
            ("height", Command::Height),
            ("Clear", Command::Clear),
        ];
        for (line, expected) in cases {
            assert_eq!(Command::parse(line).unwrap(), Some(expected), "{}", line);
        }
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t").unwrap(), None);
        assert_eq!(Command::parse("# insert 1").unwrap(), None);
    }

    #[test]
    fn parses_trailing_comment() {
        assert_eq!(
            Command::parse("range 35 65      # prints \"40 50 60\"").unwrap(),
            Some(Command::Range(35, 65))
        );
        assert_eq!(Command::parse("inorder#no space").unwrap(), Some(Command::Inorder));
        assert_eq!(
            Command::parse("insert 1 2 # 3 4").unwrap(),
            Some(Command::Insert(vec![1, 2]))
        );
    }

    #[test]
    fn runs_the_documented_example() {
        let output = run("\
insert 50 30 70 20 40 60 80
range 35 65      # prints \"40 50 60\"
kth 3            # prints \"60\"
delete 50
inorder          # prints \"20 30 40 60 70 80\"
");
        assert_eq!(output, "40 50 60\n60\n20 30 40 60 70 80\n");
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(matches!(
            Command::parse("frobnicate 1"),
            Err(LabError::UnknownCommand(name)) if name == "frobnicate"
        ));
        assert!(matches!(
            Command::parse("insert"),
            Err(LabError::MissingArgument { .. })
        ));
        assert!(matches!(
            Command::parse("insert 1 x"),
            Err(LabError::InvalidKey { token, .. }) if token == "x"
        ));
        assert!(matches!(
            Command::parse("kth two"),
            Err(LabError::InvalidRank { .. })
        ));
        assert!(matches!(
            Command::parse("len 3"),
            Err(LabError::TrailingArgument { token, .. }) if token == "3"
        ));
        assert!(matches!(
            Command::parse("search 99999999999"),
            Err(LabError::InvalidKey { .. })
        ));
    }

    #[test]
    fn runs_a_lab_session() {
        let output = run("\
# build the sample tree
insert 50 30 70 20 40 60 80
len
inorder
preorder
postorder
range 35 65
range 65 35
kth 1
kth 3
kth 8
kth 0
kth -4
min
max
height
delete 50 45
search 50
inorder
clear
empty
inorder
");
        assert_eq!(
            output,
            "\
7
20 30 40 50 60 70 80
50 30 20 40 70 60 80
20 40 30 60 80 70 50
40 50 60

80
60
not found
not found
not found
20
80
3
false
20 30 40 60 70 80
true

"
        );
    }

    #[test]
    fn echo_prefixes_commands() {
        let mut session = Session::new(Vec::new()).with_echo(true);
        session.run_script("insert 1\n\nlen\n".as_bytes()).unwrap();

        assert_eq!(session.into_inner(), b"> insert 1\n> len\n1\n");
    }

    #[test]
    fn reports_the_failing_line() {
        let mut session = Session::new(Vec::new());
        let err = session
            .run_script("insert 1\nlen\nbogus\ninsert 2\n".as_bytes())
            .unwrap_err();

        match err {
            LabError::Line { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, LabError::UnknownCommand(_)));
            }
            other => panic!("unexpected error {:?}", other),
        }
        // Lines after the failure never ran.
        assert_eq!(session.tree().len(), 1);
    }
}
