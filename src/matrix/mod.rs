// Rating matrix — the user × title pivot of the flat relation.
//
// One dense pivot is built per load and never mutated afterwards. Two views
// read from it:
//
//   sparse: unrated cells are None. Used by correlation, which must only look
//           at rows where both columns were rated.
//   filled: unrated cells read as 0.0. Used by cosine similarity and the
//           weighted prediction, where zero means "no contribution".
//
// The filled view carries an explicit observed mask, so "rated 0" and "not
// rated" stay distinguishable even though both read as 0.0.
//
// Rows are user ids ascending, columns are clean titles in lexicographic
// order. Several ratings for the same (user, title) cell are averaged.

use std::collections::HashMap;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Zip};
use tracing::{info, warn};

use crate::dataset::loader::FlatRatings;

/// Dense user × title rating matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    users: Vec<u32>,
    titles: Vec<String>,
    user_index: HashMap<u32, usize>,
    title_index: HashMap<String, usize>,
    /// Cell values, 0.0 where unobserved
    values: Array2<f64>,
    observed: Array2<bool>,
    duplicates_collapsed: usize,
}

impl RatingMatrix {
    /// Pivot the flat relation into a matrix.
    pub fn build(flat: &FlatRatings) -> Self {
        let mut users: Vec<u32> = flat.rows().iter().map(|r| r.user_id).collect();
        users.sort_unstable();
        users.dedup();

        let mut titles: Vec<String> = flat
            .rows()
            .iter()
            .map(|r| r.clean_title.clone())
            .collect();
        titles.sort_unstable();
        titles.dedup();

        let user_index: HashMap<u32, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let title_index: HashMap<String, usize> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();

        let shape = (users.len(), titles.len());
        let mut values = Array2::<f64>::zeros(shape);
        let mut counts = Array2::<u32>::zeros(shape);

        for row in flat.rows() {
            let cell = [user_index[&row.user_id], title_index[&row.clean_title]];
            values[cell] += row.rating;
            counts[cell] += 1;
        }

        let mut duplicates_collapsed = 0;
        Zip::from(&mut values).and(&counts).for_each(|value, &count| {
            if count > 1 {
                duplicates_collapsed += 1;
                *value /= count as f64;
            }
        });
        let observed = counts.mapv(|count| count > 0);

        if duplicates_collapsed > 0 {
            warn!(
                cells = duplicates_collapsed,
                "Duplicate (user, title) ratings averaged into one cell"
            );
        }

        let matrix = Self {
            users,
            titles,
            user_index,
            title_index,
            values,
            observed,
            duplicates_collapsed,
        };

        info!(
            users = matrix.n_users(),
            titles = matrix.n_titles(),
            observed = matrix.observed_count(),
            "Built rating matrix"
        );

        matrix
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_titles(&self) -> usize {
        self.titles.len()
    }

    /// Row labels (user ids, ascending).
    pub fn users(&self) -> &[u32] {
        &self.users
    }

    /// Column labels (clean titles, lexicographic).
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn user_row(&self, user_id: u32) -> Option<usize> {
        self.user_index.get(&user_id).copied()
    }

    pub fn title_column(&self, clean_title: &str) -> Option<usize> {
        self.title_index.get(clean_title).copied()
    }

    /// Number of cells holding an observed rating.
    pub fn observed_count(&self) -> usize {
        self.observed.iter().filter(|&&o| o).count()
    }

    /// Observed cells as a fraction of all cells (0.0 for an empty matrix).
    pub fn density(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.observed_count() as f64 / self.values.len() as f64
        }
    }

    /// Cells that had more than one rating and were averaged.
    pub fn duplicates_collapsed(&self) -> usize {
        self.duplicates_collapsed
    }

    /// The missing-aware view.
    pub fn sparse(&self) -> SparseView<'_> {
        SparseView { matrix: self }
    }

    /// The zero-filled view with its observed mask.
    pub fn filled(&self) -> FilledView<'_> {
        FilledView { matrix: self }
    }
}

/// Matrix view where unrated cells are absent.
#[derive(Debug, Clone, Copy)]
pub struct SparseView<'a> {
    matrix: &'a RatingMatrix,
}

impl<'a> SparseView<'a> {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let cell = [row, col];
        self.matrix.observed[cell].then(|| self.matrix.values[cell])
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, col: usize) -> Array1<Option<f64>> {
        Zip::from(self.matrix.values.column(col))
            .and(self.matrix.observed.column(col))
            .map_collect(|&value, &observed| observed.then_some(value))
    }
}

/// Matrix view where unrated cells read as 0.0.
#[derive(Debug, Clone, Copy)]
pub struct FilledView<'a> {
    matrix: &'a RatingMatrix,
}

impl<'a> FilledView<'a> {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix.values[[row, col]]
    }

    /// The whole users × titles array.
    pub fn values(&self) -> ArrayView2<'a, f64> {
        self.matrix.values.view()
    }

    /// One user's ratings across every title.
    pub fn row(&self, row: usize) -> ArrayView1<'a, f64> {
        self.matrix.values.row(row)
    }

    pub fn is_observed(&self, row: usize, col: usize) -> bool {
        self.matrix.observed[[row, col]]
    }

    /// Observed mask for one user's row.
    pub fn observed_row(&self, row: usize) -> ArrayView1<'a, bool> {
        self.matrix.observed.row(row)
    }
}
