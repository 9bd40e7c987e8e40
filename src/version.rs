//! Package version ordering.
//!
//! Versions follow the pacman scheme `[epoch:]pkgver[-pkgrel]`. [`vercmp`]
//! orders two such strings exactly like libalpm does, which is what decides
//! which build of a package is the newest one.
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use repoclean::version::vercmp;
//!
//! assert_eq!(vercmp("1.0.9-1", "1.0.10-1"), Ordering::Less);
//! assert_eq!(vercmp("1.0alpha-1", "1.0-1"), Ordering::Less);
//! assert_eq!(vercmp("1:0.5-1", "2-1"), Ordering::Greater);
//! ```

use std::cmp::Ordering;


/// A version string split into its epoch, pkgver and optional pkgrel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evr<'a> {
    /// Epoch, `"0"` when absent or empty
    pub epoch: &'a str,
    /// Upstream version
    pub version: &'a str,
    /// Package release, if the string carries one
    pub release: Option<&'a str>,
}

impl<'a> Evr<'a> {
    /// Split `[epoch:]version[-release]`.
    ///
    /// The epoch is only recognized when the string starts with digits
    /// directly followed by `:`. The release is whatever follows the last
    /// `-`.
    pub fn parse(evr: &'a str) -> Self {
        let digits = evr.bytes().take_while(u8::is_ascii_digit).count();

        let (epoch, rest) = match evr[digits..].strip_prefix(':') {
            Some(rest) if digits == 0 => ("0", rest),
            Some(rest) => (&evr[..digits], rest),
            None => ("0", evr),
        };

        let (version, release) = match rest.rfind('-') {
            Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
            None => (rest, None),
        };

        Self {
            epoch,
            version,
            release,
        }
    }
}

/// Compare two full package versions.
///
/// Epochs are compared first, then versions, then releases. Releases only
/// take part when both sides have one, so `1.5` and `1.5-1` are equal.
pub fn vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let left = Evr::parse(a);
    let right = Evr::parse(b);

    segment_cmp(left.epoch, right.epoch)
        .then_with(|| segment_cmp(left.version, right.version))
        .then_with(|| match (left.release, right.release) {
            (Some(l), Some(r)) => segment_cmp(l, r),
            _ => Ordering::Equal,
        })
}

/// Compare one component of a version by its alternating digit and letter
/// runs.
///
/// Anything that is not an ASCII letter or digit separates runs. A longer
/// separator sorts higher, a digit run beats a letter run, and a trailing
/// letter run loses against the end of the string (`1.0rc < 1.0`).
pub fn segment_cmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let lhs = a.as_bytes();
    let rhs = b.as_bytes();

    // `one`/`two` point at the start of the current run, `end1`/`end2` at the
    // end of the previous one.
    let (mut one, mut two) = (0, 0);
    let (mut end1, mut end2) = (0, 0);

    while one < lhs.len() && two < rhs.len() {
        one = skip_separators(lhs, one);
        two = skip_separators(rhs, two);

        if one >= lhs.len() || two >= rhs.len() {
            break;
        }

        let sep1 = one - end1;
        let sep2 = two - end2;
        if sep1 != sep2 {
            return sep1.cmp(&sep2);
        }

        let numeric = lhs[one].is_ascii_digit();
        let run: fn(&u8) -> bool = if numeric {
            u8::is_ascii_digit
        } else {
            u8::is_ascii_alphabetic
        };
        end1 = run_end(lhs, one, run);
        end2 = run_end(rhs, two, run);

        // Different run types: numbers are newer than letters.
        if two == end2 {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ord = if numeric {
            numeric_cmp(&lhs[one..end1], &rhs[two..end2])
        } else {
            lhs[one..end1].cmp(&rhs[two..end2])
        };
        if ord != Ordering::Equal {
            return ord;
        }

        one = end1;
        two = end2;
    }

    let rest1 = lhs.get(one);
    let rest2 = rhs.get(two);

    match (rest1, rest2) {
        (None, None) => Ordering::Equal,
        (Some(c), _) if c.is_ascii_alphabetic() => Ordering::Less,
        (None, Some(c)) if !c.is_ascii_alphabetic() => Ordering::Less,
        _ => Ordering::Greater,
    }
}

fn skip_separators(s: &[u8], mut idx: usize) -> usize {
    while idx < s.len() && !s[idx].is_ascii_alphanumeric() {
        idx += 1;
    }
    idx
}

fn run_end(s: &[u8], mut idx: usize, run: fn(&u8) -> bool) -> usize {
    while idx < s.len() && run(&s[idx]) {
        idx += 1;
    }
    idx
}

/// Digit runs of any length, leading zeros ignored.
fn numeric_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(s: &[u8]) -> &[u8] {
    let zeros = s.iter().take_while(|&&c| c == b'0').count();
    &s[zeros..]
}
