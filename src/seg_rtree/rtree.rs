use crate::utils::{calculate_level_indices, rectangles_from_coordinates, winding_number};
use crate::{Coordinate, Rectangle};

/// A packed R-tree over the consecutive segments of a path.
///
/// Leaf `i` holds the envelope of segment `i`, and every internal node covers
/// `degree` consecutive children. Because children are contiguous runs of the
/// path, a node also stands for the sub-path between its first and last
/// coordinate, which lets ring queries replace a whole subtree by its chord.
#[derive(Debug, Clone)]
pub struct SegRTree {
    degree: usize,
    max_size: usize,
    current_size: usize,
    current_level: usize,
    level_indices: Vec<usize>,
    tree: Vec<Rectangle>,
}

impl SegRTree {
    pub fn len(&self) -> usize {
        self.current_size
    }

    pub fn is_empty(&self) -> bool {
        self.current_size == 0
    }

    pub fn height(&self) -> usize {
        self.current_level
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn new_empty() -> Self {
        SegRTree {
            degree: 2,
            max_size: 0,
            current_size: 0,
            current_level: 0,
            level_indices: vec![0],
            tree: vec![Rectangle::new_empty()],
        }
    }

    pub fn new(mut degree: usize, max_size: usize) -> Self {
        degree = degree.max(2);
        let level_indices = calculate_level_indices(degree, max_size);
        let tree_size = level_indices[level_indices.len() - 1] + 1;
        let empty_rect = Rectangle::new_empty();
        SegRTree {
            degree,
            max_size,
            current_size: 0,
            current_level: 0,
            level_indices,
            tree: vec![empty_rect; tree_size],
        }
    }

    pub fn new_loaded(mut degree: usize, rects: &[Rectangle]) -> Self {
        degree = degree.max(2);
        let max_size = rects.len();
        let level_indices = calculate_level_indices(degree, max_size);
        let tree_size = level_indices[level_indices.len() - 1] + 1;
        let empty_rect = Rectangle::new_empty();
        let mut tree = vec![empty_rect; tree_size];
        copy_into_tree(&mut tree, 0, rects);

        for level in 1..level_indices.len() {
            let level_index = level_indices[level];
            let previous_items = &tree[level_indices[level - 1]..level_index];
            let next_items: Vec<Rectangle> = previous_items
                .chunks(degree)
                .map(|items| Rectangle::of(items))
                .collect();
            copy_into_tree(&mut tree, level_index, &next_items);
        }

        tree.shrink_to_fit();
        SegRTree {
            degree,
            max_size,
            current_size: max_size,
            current_level: level_indices.len() - 1,
            level_indices,
            tree,
        }
    }

    /// Bulk-load the segments of a coordinate path.
    pub fn from_path(degree: usize, coords: &[Coordinate]) -> Self {
        if coords.len() < 2 {
            SegRTree::new_empty()
        } else {
            SegRTree::new_loaded(degree, &rectangles_from_coordinates(coords))
        }
    }

    pub fn envelope(&self) -> Rectangle {
        self.get_rectangle(self.height(), 0)
    }

    pub fn add(&mut self, mut rect: Rectangle) -> Result<(), String> {
        if self.current_size >= self.max_size {
            return Err("Exceeded capacity".to_owned());
        }

        let mut level = 0;
        let mut offset = self.current_size;
        loop {
            let index = self.level_indices[level] + offset;
            rect.expand(self.tree[index]);
            self.tree[index] = rect;
            if offset == 0 {
                break;
            } else if offset == 1 {
                // The parent needs the other child
                rect.expand(self.tree[index - 1]);
            }
            offset /= self.degree;
            level += 1;
        }

        self.current_level = level;
        self.current_size += 1;
        Ok(())
    }

    pub fn query_rect(&self, rect: Rectangle) -> Vec<usize> {
        self.query(|level, offset| self.get_rectangle(level, offset).intersects(rect))
    }

    pub fn query_point(&self, point: Coordinate) -> Vec<usize> {
        self.query(|level, offset| self.get_rectangle(level, offset).contains(point))
    }

    fn query<P>(&self, predicate: P) -> Vec<usize>
    where
        P: Fn(usize, usize) -> bool,
    {
        let mut results = Vec::new();
        if self.current_size == 0 {
            return results;
        }

        // Stack entries: (level, offset)
        let mut stack = vec![(self.height(), 0)];
        while let Some((level, offset)) = stack.pop() {
            if !predicate(level, offset) {
                continue;
            }
            if level == 0 {
                results.push(offset);
            } else {
                let child_level = level - 1;
                let first_child_offset = self.degree * offset;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((child_level, child_offset));
                }
            }
        }

        results
    }

    /// All pairs `(a, b)` with `a < b` whose segment envelopes intersect.
    /// Adjacent segments always share a vertex, so they are always reported.
    pub fn query_self_intersections(&self) -> Vec<(usize, usize)> {
        let mut results = Vec::new();
        if self.current_size == 0 {
            return results;
        }

        // Stack entries: (level_a, offset_a, level_b, offset_b)
        let mut stack = vec![(self.height(), 0, self.height(), 0)];

        while let Some((level_a, offset_a, level_b, offset_b)) = stack.pop() {
            let rect_a = self.get_rectangle(level_a, offset_a);
            let rect_b = self.get_rectangle(level_b, offset_b);
            if !rect_a.intersects(rect_b) {
                continue;
            }

            if level_a == 0 && level_b == 0 {
                if offset_a < offset_b {
                    results.push((offset_a, offset_b));
                }
            } else if level_a == level_b {
                let child_level = level_a - 1;
                let first_child_offset = self.degree * offset_a;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((child_level, child_offset, level_b, offset_b));
                }
            } else {
                let child_level = level_b - 1;
                let first_child_offset = self.degree * offset_b;
                let last_child_offset = first_child_offset + self.degree;
                for child_offset in first_child_offset..last_child_offset {
                    stack.push((level_a, offset_a, child_level, child_offset));
                }
            }
        }

        results
    }

    /// All pairs `(a, b)`, `a` a segment of `self` and `b` one of `other`,
    /// whose envelopes intersect.
    pub fn query_other_intersections(&self, other: &SegRTree) -> Vec<(usize, usize)> {
        let mut results = Vec::new();
        if self.is_empty() || other.is_empty() {
            return results;
        }

        let mut stack = vec![(self.height(), 0, other.height(), 0)];
        while let Some((level_a, offset_a, level_b, offset_b)) = stack.pop() {
            let rect_a = self.get_rectangle(level_a, offset_a);
            let rect_b = other.get_rectangle(level_b, offset_b);
            if !rect_a.intersects(rect_b) {
                continue;
            }

            if level_a == 0 && level_b == 0 {
                results.push((offset_a, offset_b));
            } else if level_a >= level_b {
                let first_child_offset = self.degree * offset_a;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((level_a - 1, child_offset, level_b, offset_b));
                }
            } else {
                let first_child_offset = other.degree * offset_b;
                for child_offset in first_child_offset..(first_child_offset + other.degree) {
                    stack.push((level_a, offset_a, level_b - 1, child_offset));
                }
            }
        }

        results
    }

    /// Winding number of `point` with respect to the closed path `coords`
    /// this tree was built from.
    pub fn winding_number(&self, point: Coordinate, coords: &[Coordinate]) -> i32 {
        self.winding_number_by(point, |low, high| {
            winding_number(point, coords[low], coords[high])
        })
    }

    /// Sum crossing numbers over the path. `crossing(low, high)` must return
    /// the crossing number of the chord from coordinate `low` to coordinate
    /// `high`; it is called on single segments and on whole subtrees lying
    /// strictly to the right of `point`, where the chord crosses the ray
    /// exactly as often as the sub-path does.
    pub fn winding_number_by<F>(&self, point: Coordinate, crossing: F) -> i32
    where
        F: Fn(usize, usize) -> i32,
    {
        let mut wn: i32 = 0;
        if self.current_size == 0 {
            return wn;
        }

        // Stack entries: (level, offset)
        let mut stack = vec![(self.height(), 0)];
        while let Some((level, offset)) = stack.pop() {
            let rect = self.get_rectangle(level, offset);
            if rect.x_min > point.x {
                let (low, high) = self.get_low_high(level, offset);
                // The last subtree may be partially filled.
                wn += crossing(low, high.min(self.current_size));
                continue;
            }
            if !rect.contains(point) {
                continue;
            }
            if level == 0 {
                wn += crossing(offset, offset + 1);
            } else {
                let child_level = level - 1;
                let first_child_offset = self.degree * offset;
                for child_offset in first_child_offset..(first_child_offset + self.degree) {
                    stack.push((child_level, child_offset));
                }
            }
        }

        wn
    }

    pub(crate) fn get_rectangle(&self, level: usize, offset: usize) -> Rectangle {
        self.tree
            .get(self.level_indices[level] + offset)
            .copied()
            .unwrap_or_else(Rectangle::new_empty)
    }

    pub(crate) fn get_low_high(&self, level: usize, offset: usize) -> (usize, usize) {
        let width = self.degree.pow(level as u32);
        (width * offset, width * (offset + 1))
    }
}

fn copy_into_tree(tree: &mut [Rectangle], index: usize, rects: &[Rectangle]) {
    let (_, subtree) = tree.split_at_mut(index);
    let (subtree, _) = subtree.split_at_mut(rects.len());
    subtree.copy_from_slice(rects);
}
