//! Newick serialization, see <https://en.wikipedia.org/wiki/Newick_format>.

use crate::phylogeny::{Phylogeny, Visit, DEFAULT_DISTANCE};

/// Characters that end or split an unquoted Newick label.
fn is_special(c: char) -> bool {
    matches!(
        c,
        ' ' | ',' | ';' | '\t' | '\n' | '\r' | '(' | ')' | ':' | '[' | ']' | '\''
    )
}

/// Single-quote a label if it holds Newick punctuation, doubling inner quotes.
///
/// ```
/// use clonetree::phylogeny::newick::escape_label;
/// assert_eq!(escape_label("clone_1"), "clone_1");
/// assert_eq!(escape_label("clone 1"), "'clone 1'");
/// assert_eq!(escape_label("Baillon's"), "'Baillon''s'");
/// ```
pub fn escape_label(label: &str) -> String {
    if label.chars().any(is_special) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

/// Newick string for the phylogeny, terminated by `;`.
///
/// Every edge, the root's included, has length [`DEFAULT_DISTANCE`]. An empty
/// phylogeny gives an empty string.
///
/// ```
/// use clonetree::phylogeny::{Edge, Phylogeny};
/// use clonetree::phylogeny::newick::to_newick;
///
/// let edges = vec![Edge::new("A", "B"), Edge::new("A", "C")];
/// let phylogeny = Phylogeny::reconstruct(&edges).unwrap();
/// assert_eq!(to_newick(&phylogeny), "(B:0.1,C:0.1)A:0.1;");
/// ```
pub fn to_newick(phylogeny: &Phylogeny) -> String {
    if phylogeny.is_empty() {
        return String::new();
    }

    let mut newick = String::new();
    // one entry per open clone, true until its first child is written
    let mut first_child: Vec<bool> = Vec::new();

    for visit in phylogeny.walk() {
        match visit {
            Visit::Enter(name) => {
                if let Some(first) = first_child.last_mut() {
                    if !*first {
                        newick.push(',');
                    }
                    *first = false;
                }
                if !phylogeny.is_leaf(name) {
                    newick.push('(');
                }
                first_child.push(true);
            }
            Visit::Exit(name) => {
                first_child.pop();
                if !phylogeny.is_leaf(name) {
                    newick.push(')');
                }
                newick.push_str(&escape_label(name));
                newick.push_str(&format!(":{DEFAULT_DISTANCE}"));
            }
        }
    }

    newick.push(';');
    newick
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phylogeny::{Edge, TreeError};
    use itertools::Itertools;

    fn newick(pairs: &[(&str, &str)]) -> Result<String, TreeError> {
        let edges = pairs.iter().map(|(a, d)| Edge::new(a, d)).collect_vec();
        Ok(to_newick(&Phylogeny::reconstruct(&edges)?))
    }

    #[test]
    fn empty() -> Result<(), TreeError> {
        assert_eq!(newick(&[])?, "");
        Ok(())
    }

    #[test]
    fn single_edge() -> Result<(), TreeError> {
        assert_eq!(newick(&[("A", "B")])?, "(B:0.1)A:0.1;");
        Ok(())
    }

    #[test]
    fn siblings() -> Result<(), TreeError> {
        assert_eq!(newick(&[("A", "B"), ("A", "C")])?, "(B:0.1,C:0.1)A:0.1;");
        assert_eq!(newick(&[("A", "C"), ("A", "B")])?, "(C:0.1,B:0.1)A:0.1;");
        Ok(())
    }

    #[test]
    fn nested() -> Result<(), TreeError> {
        let pairs = [("1", "2"), ("2", "4"), ("1", "3"), ("2", "5"), ("3", "6")];
        assert_eq!(
            newick(&pairs)?,
            "((4:0.1,5:0.1)2:0.1,(6:0.1)3:0.1)1:0.1;"
        );
        Ok(())
    }

    #[test]
    fn quoted_labels() -> Result<(), TreeError> {
        assert_eq!(
            newick(&[("clone A", "B:1")])?,
            "('B:1':0.1)'clone A':0.1;"
        );
        Ok(())
    }

    #[test]
    fn ambiguous_root_is_not_serialized() {
        let result = newick(&[("A", "B"), ("C", "D")]);
        assert!(matches!(result, Err(TreeError::AmbiguousRoot { .. })));
    }

    #[test]
    fn deep_chain() -> Result<(), TreeError> {
        let names = (0..20_000).map(|i| format!("c{i}")).collect_vec();
        let edges = names
            .iter()
            .tuple_windows()
            .map(|(a, d)| Edge::new(a, d))
            .collect_vec();
        let output = to_newick(&Phylogeny::reconstruct(&edges)?);

        assert!(output.starts_with(&"(".repeat(names.len() - 1)));
        assert!(output.ends_with(")c0:0.1;"));
        assert_eq!(output.matches(')').count(), names.len() - 1);
        Ok(())
    }
}
