//! Text front end: loading keys from a token stream, answering queries and
//! reporting on the finished tree.
//!
//! Input is split on ASCII/Unicode whitespace; every token is one key.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::{AvlTree, Result};

/// Inserts every whitespace-separated token read from `reader`.
///
/// Returns the number of tokens inserted. The first failed insert aborts the
/// load. When the tree was built with `show_steps`, each insert is traced to
/// `trace` together with the resulting tree shape.
pub fn load<R: BufRead, W: Write>(tree: &mut AvlTree, reader: R, trace: &mut W) -> Result<usize> {
    let show_steps = tree.config().show_steps;
    let mut loaded = 0usize;

    for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            if show_steps {
                writeln!(trace, "Insert {token}>")?;
            }
            tree.insert(token)?;
            loaded += 1;
            if show_steps {
                writeln!(trace, "Tree representation:")?;
                write!(trace, "{}", tree.structure())?;
            }
        }
    }

    Ok(loaded)
}

/// [`load`] from a file on disk.
pub fn load_file<P: AsRef<Path>, W: Write>(
    tree: &mut AvlTree,
    path: P,
    trace: &mut W,
) -> Result<usize> {
    let file = File::open(path)?;
    load(tree, BufReader::new(file), trace)
}

/// Writes the final height and node count. With `show_steps`, the inorder
/// listing and the tree shape come first.
pub fn report<W: Write>(tree: &AvlTree, out: &mut W) -> Result<()> {
    if tree.config().show_steps {
        writeln!(out)?;
        write!(out, "Inorder traversal: ")?;
        for key in tree {
            write!(out, "{key} ")?;
        }
        writeln!(out)?;
        writeln!(out, "Tree representation:")?;
        write!(out, "{}", tree.structure())?;
    }

    writeln!(out, "Height of tree: {}", tree.height())?;
    writeln!(out, "# of nodes: {}", tree.len())?;
    Ok(())
}

/// Answers one lookup per token until `input` is exhausted.
///
/// A `Query: ` prompt precedes every answer and trails the last one. Returns
/// the number of queries answered.
pub fn query_loop<R: BufRead, W: Write>(tree: &AvlTree, input: R, out: &mut W) -> Result<usize> {
    let mut answered = 0usize;
    write!(out, "Query: ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            match tree.retrieve(token) {
                Some(key) => writeln!(out, "{key} found!")?,
                None => writeln!(out, "{token} NOT found!")?,
            }
            answered += 1;
            write!(out, "Query: ")?;
            out.flush()?;
        }
    }

    Ok(answered)
}
