use derive_new::new;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
}

impl<T: Display> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edit::Delete { value } => write!(f, "-{value}"),
            Edit::Insert { value } => write!(f, "+{value}"),
        }
    }
}

pub trait DiffAlgorithm<T> {
    type Table;
    type EditScript;

    fn compute_table(&self) -> Self::Table;
    /// Edits from the end of both sequences back to the start
    fn backtrack(&self) -> Self::EditScript;
    /// Edits in forward order
    fn diff(&self) -> Self::EditScript;
}

/// Longest-common-subsequence diff
///
/// `dp[i][j]` holds the LCS length of `a[..i]` and `b[..j]`. Walking back from
/// `(n, m)`, a matching pair is always taken first; otherwise an insertion is
/// preferred whenever the cell to the left is at least as good as the cell
/// above, and a deletion is taken when it is not (or when `b` is exhausted).
/// O(n·m) time and space.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LcsDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T: Eq + Clone> DiffAlgorithm<T> for LcsDiff<'_, T> {
    type Table = Vec<Vec<usize>>;
    type EditScript = Vec<Edit<T>>;

    fn compute_table(&self) -> Self::Table {
        let (n, m) = (self.a.len(), self.b.len());
        let mut dp = vec![vec![0; m + 1]; n + 1];

        for i in 1..=n {
            for j in 1..=m {
                dp[i][j] = if self.a[i - 1] == self.b[j - 1] {
                    dp[i - 1][j - 1] + 1
                } else {
                    dp[i - 1][j].max(dp[i][j - 1])
                };
            }
        }

        dp
    }

    fn backtrack(&self) -> Self::EditScript {
        let dp = self.compute_table();
        let (mut i, mut j) = (self.a.len(), self.b.len());
        let mut edits = Vec::new();

        loop {
            if i > 0 && j > 0 && self.a[i - 1] == self.b[j - 1] {
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
                edits.push(Edit::Insert {
                    value: self.b[j - 1].clone(),
                });
                j -= 1;
            } else if i > 0 {
                edits.push(Edit::Delete {
                    value: self.a[i - 1].clone(),
                });
                i -= 1;
            } else {
                break;
            }
        }

        edits
    }

    fn diff(&self) -> Self::EditScript {
        let mut edits = self.backtrack();
        edits.reverse();
        edits
    }
}
