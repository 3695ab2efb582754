//! Day 7: No Space Left On Device

use std::collections::BTreeMap;
use std::fmt;

use index_vec::IndexVec;

use crate::helpers::parse;
use crate::{debugln, Answer, DaySolver, Result, SolveError, Visualization};

pub(crate) const EXAMPLE: &str = include_str!("../../data/examples/07.txt");

pub const SMALL_DIR_MAX_SIZE: u64 = 100_000;
pub const TOTAL_DISK_SPACE: u64 = 70_000_000;
pub const REQUIRED_FREE_SPACE: u64 = 30_000_000;

index_vec::define_index_type! {
    pub struct DirId = u32;
}

/// One line of the terminal transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Cd(CdTarget),
    Ls,
    Dir { name: String },
    File { name: String, size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdTarget {
    Root,
    Parent,
    Child(String),
}

#[derive(Debug, Default, Clone)]
pub struct Dir {
    pub parent: Option<DirId>,
    pub subdirs: BTreeMap<String, DirId>,
    pub files: BTreeMap<String, u64>,
}

/// The directory tree reconstructed from a transcript. The root is always the
/// first directory.
#[derive(Debug, Clone)]
pub struct FileSystem {
    dirs: IndexVec<DirId, Dir>,
}

impl FileSystem {
    pub fn root() -> DirId {
        DirId::from_raw(0)
    }

    pub fn from_transcript(lines: &[(usize, Line)]) -> Result<Self> {
        let mut dirs = IndexVec::new();
        dirs.push(Dir::default());
        let mut this = Self { dirs };
        let mut cwd = Self::root();

        for (line_number, line) in lines {
            match line {
                Line::Cd(CdTarget::Root) => cwd = Self::root(),
                Line::Cd(CdTarget::Parent) => {
                    cwd = this.dirs[cwd].parent.ok_or_else(|| {
                        SolveError::structure(format!(
                            "line {line_number}: cannot leave the root directory"
                        ))
                    })?;
                }
                Line::Cd(CdTarget::Child(name)) => cwd = this.subdir(cwd, name),
                Line::Ls => {}
                Line::Dir { name } => {
                    this.subdir(cwd, name);
                }
                Line::File { name, size } => {
                    this.dirs[cwd].files.insert(name.clone(), *size);
                }
            }
        }

        debugln!("{}", this.pretty(&this.total_sizes()));
        Ok(this)
    }

    /// The child directory `name` of `parent`, created if it was not listed.
    fn subdir(&mut self, parent: DirId, name: &str) -> DirId {
        if let Some(&id) = self.dirs[parent].subdirs.get(name) {
            return id;
        }
        let id = self.dirs.push(Dir {
            parent: Some(parent),
            ..Dir::default()
        });
        self.dirs[parent].subdirs.insert(name.to_owned(), id);
        id
    }

    /// Total size of every directory, including everything below it.
    pub fn total_sizes(&self) -> IndexVec<DirId, u64> {
        let mut totals: IndexVec<DirId, u64> = self
            .dirs
            .iter()
            .map(|dir| dir.files.values().sum())
            .collect();
        // Children are always created after their parent.
        for id in self.dirs.indices().rev() {
            if let Some(parent) = self.dirs[id].parent {
                totals[parent] += totals[id];
            }
        }
        totals
    }

    pub fn pretty<'a>(&'a self, totals: &'a IndexVec<DirId, u64>) -> DirPrettyPrinter<'a> {
        DirPrettyPrinter {
            fs: self,
            totals,
            name: "/",
            dir: Self::root(),
            level: 0,
        }
    }
}

pub fn parse_transcript(input: &str) -> Result<Vec<(usize, Line)>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| Ok((i + 1, parse::numbered_line(i + 1, line, Line::parser())?)))
        .collect()
}

pub fn part_one(fs: &FileSystem) -> u64 {
    fs.total_sizes()
        .iter()
        .filter(|&&size| size <= SMALL_DIR_MAX_SIZE)
        .sum()
}

pub fn part_two(fs: &FileSystem) -> Result<u64> {
    let totals = fs.total_sizes();
    let used = totals[FileSystem::root()];
    let free = TOTAL_DISK_SPACE.checked_sub(used).ok_or_else(|| {
        SolveError::structure(format!("{used} bytes in use exceeds the disk size"))
    })?;
    let need_to_delete = REQUIRED_FREE_SPACE.saturating_sub(free);
    debugln!("used={used}, free={free}, need_to_delete={need_to_delete}");

    totals
        .iter()
        .copied()
        .filter(|&size| size >= need_to_delete)
        .min()
        .ok_or_else(|| SolveError::structure("no directory is large enough to delete"))
}

fn load(input: &str) -> Result<FileSystem> {
    FileSystem::from_transcript(&parse_transcript(input)?)
}

pub struct NoSpaceLeftOnDevice;

impl DaySolver for NoSpaceLeftOnDevice {
    fn part_one(&self, input: &str) -> Result<Answer> {
        let fs = load(input)?;
        let tree = fs.pretty(&fs.total_sizes()).to_string();
        Ok(Answer::new(part_one(&fs)).with_visualization(Visualization::text("Directory tree", tree)))
    }

    fn part_two(&self, input: &str) -> Result<Answer> {
        let fs = load(input)?;
        let tree = fs.pretty(&fs.total_sizes()).to_string();
        Ok(Answer::new(part_two(&fs)?).with_visualization(Visualization::text("Directory tree", tree)))
    }
}

mod parsing {
    use super::*;

    mod c {
        pub use combine::{parser::char::string, *};
    }

    use c::{ParseError, Parser, Stream};

    fn name<Input>() -> impl Parser<Input, Output = String>
    where
        Input: Stream<Token = char>,
        Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
    {
        c::many1(c::satisfy(|c: char| !c.is_whitespace()))
    }

    impl CdTarget {
        fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            c::choice((
                c::attempt(c::string("..").skip(c::eof())).map(|_| CdTarget::Parent),
                c::attempt(c::string("/").skip(c::eof())).map(|_| CdTarget::Root),
                name().map(CdTarget::Child),
            ))
        }
    }

    impl Line {
        pub fn parser<Input>() -> impl Parser<Input, Output = Self>
        where
            Input: Stream<Token = char>,
            Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
        {
            // "$ cd a" / "$ ls"
            let command = c::string("$ ").with(c::choice((
                c::string("cd ").with(CdTarget::parser()).map(Line::Cd),
                c::string("ls").map(|_| Line::Ls),
            )));

            // "dir a"
            let dir = c::string("dir ").with(name()).map(|name| Line::Dir { name });

            // "123 a"
            let file = (parse::decimal_integer(), c::token(' '), name())
                .map(|(size, _, name)| Line::File { name, size });

            c::choice((command, dir, file))
        }
    }
}

#[derive(Clone, Copy)]
pub struct DirPrettyPrinter<'a> {
    fs: &'a FileSystem,
    totals: &'a IndexVec<DirId, u64>,
    name: &'a str,
    dir: DirId,
    level: usize,
}

impl DirPrettyPrinter<'_> {
    fn indent(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = 2 * (self.level + 1))
    }
}

impl fmt::Display for DirPrettyPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} (dir, total={})", self.name, self.totals[self.dir])?;

        let dir = &self.fs.dirs[self.dir];
        for (name, &id) in &dir.subdirs {
            self.indent(f)?;
            write!(
                f,
                "{}",
                Self {
                    name,
                    dir: id,
                    level: self.level + 1,
                    ..*self
                }
            )?;
        }
        for (name, size) in &dir.files {
            self.indent(f)?;
            writeln!(f, "- {name} (file, size={size})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_one() {
        let fs = load(EXAMPLE).unwrap();
        assert_eq!(part_one(&fs), 95437);
    }

    #[test]
    fn test_part_two() {
        let fs = load(EXAMPLE).unwrap();
        assert_eq!(part_two(&fs).unwrap(), 24933642);
    }

    #[test]
    fn transcript_lines() {
        let lines = parse_transcript("$ cd /\n$ ls\ndir a\n14848514 b.txt\n$ cd ..\n$ cd a\n")
            .unwrap()
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                Line::Cd(CdTarget::Root),
                Line::Ls,
                Line::Dir { name: "a".into() },
                Line::File {
                    name: "b.txt".into(),
                    size: 14848514
                },
                Line::Cd(CdTarget::Parent),
                Line::Cd(CdTarget::Child("a".into())),
            ]
        );
    }

    #[test]
    fn same_name_in_different_dirs() {
        let input = "$ cd /\n$ ls\ndir a\ndir b\n$ cd a\n$ ls\ndir x\n$ cd x\n$ ls\n10 f\n\
                     $ cd /\n$ cd b\n$ ls\ndir x\n$ cd x\n$ ls\n20 f\n";
        let fs = load(input).unwrap();
        // x=10, a=10, x=20, b=20, /=30
        assert_eq!(part_one(&fs), 90);
    }

    #[test]
    fn leaving_root_fails() {
        assert!(matches!(load("$ cd /\n$ cd ..\n"), Err(SolveError::Structure(_))));
    }

    #[test]
    fn unknown_command() {
        let err = load("$ cd /\n$ rm -rf a\n").unwrap_err();
        assert!(matches!(err, SolveError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn tree_rendering() {
        let fs = load(EXAMPLE).unwrap();
        let tree = fs.pretty(&fs.total_sizes()).to_string();
        assert!(tree.starts_with("- / (dir, total=48381165)\n  - a (dir, total=94853)\n"));
        assert!(tree.contains("      - i (file, size=584)\n"));
    }
}
