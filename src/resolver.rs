//! Path ordering and dependency-to-module resolution (spec.md §4.6).

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use crate::module_report::Dependency;

/// Orders two module paths the way a typical project listing would:
/// ancestor directories' files before descendants'. Shorter path (by
/// separator-delimited segment count) wins; ties fall back to raw
/// lexicographic order on the string.
pub fn path_order(a: &str, b: &str) -> Ordering {
    let depth = |p: &str| p.split(std::path::MAIN_SEPARATOR).count();
    depth(a).cmp(&depth(b)).then_with(|| a.cmp(b))
}

/// Whether `path` is a CommonJS-style relative import: starts with `./` or
/// `../`.
fn is_relative(path: &str) -> bool {
    let bytes = path.as_bytes();
    let sep = std::path::MAIN_SEPARATOR as u8;
    (bytes.len() >= 2 && bytes[0] == b'.' && bytes[1] == sep)
        || (bytes.len() >= 3 && bytes[0] == b'.' && bytes[1] == b'.' && bytes[2] == sep)
}

fn absolute(path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        Path::new(&std::path::MAIN_SEPARATOR.to_string()).join(p)
    }
}

fn dirname(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR.to_string()))
}

/// Lexically resolves `.`/`..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                out.pop();
            }
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves a dependency record `dep`, emitted by the module at `from`,
/// against candidate module `to`. Implements spec.md §4.6's CommonJS gate,
/// path-algebra, and extension-fallback rules verbatim, including the
/// open-question fallback of appending `to`'s extension rather than trying
/// a canonical list of known extensions.
pub fn resolves(dep: &Dependency, from: &str, to: &str) -> bool {
    if dep.kind == "CommonJS" && !is_relative(&dep.path) {
        return false;
    }

    let from_abs = absolute(from);
    let to_abs = absolute(to);
    let dep_abs = normalize(&dirname(&from_abs).join(&dep.path));

    if Path::new(&dep.path).extension().is_none() {
        let with_index = dep_abs.join("index.js");
        if with_index == to_abs {
            return true;
        }
        match to_abs.extension() {
            Some(ext) => {
                let mut candidate = dep_abs.into_os_string();
                candidate.push(".");
                candidate.push(ext);
                PathBuf::from(candidate) == to_abs
            }
            None => false,
        }
    } else {
        dep_abs == to_abs
    }
}
