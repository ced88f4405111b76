//! Nearest-neighbour tour construction.

use waypath_core::CostMatrix;

/// Greedy tour starting at index `0`.
///
/// Each step appends the closest unvisited waypoint by distance. The scan runs
/// in ascending index order and only a strictly smaller distance replaces the
/// current best, so ties resolve to the lowest index.
pub(crate) fn nearest_neighbour(matrix: &CostMatrix) -> Vec<usize> {
    let size = matrix.size();
    if size == 0 {
        return Vec::new();
    }
    let mut visited = vec![false; size];
    let mut order = Vec::with_capacity(size);
    let mut current = 0;
    mark(&mut visited, current);
    order.push(current);

    while order.len() < size {
        let Some(next) = closest_unvisited(matrix, &visited, current) else {
            break;
        };
        mark(&mut visited, next);
        order.push(next);
        current = next;
    }
    order
}

fn closest_unvisited(matrix: &CostMatrix, visited: &[bool], from: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (candidate, seen) in visited.iter().enumerate() {
        if *seen {
            continue;
        }
        let distance = matrix.distance(from, candidate).unwrap_or(f64::INFINITY);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(index, _)| index)
}

fn mark(visited: &mut [bool], index: usize) {
    if let Some(slot) = visited.get_mut(index) {
        *slot = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matrix(rows: Vec<Vec<f64>>) -> CostMatrix {
        CostMatrix::from_distances(rows).expect("valid matrix")
    }

    #[rstest]
    fn empty_matrix_yields_empty_order() {
        assert!(nearest_neighbour(&matrix(Vec::new())).is_empty());
    }

    #[rstest]
    fn single_waypoint_is_its_own_tour() {
        assert_eq!(nearest_neighbour(&matrix(vec![vec![0.0]])), vec![0]);
    }

    #[rstest]
    fn follows_the_closest_unvisited_waypoint() {
        let built = nearest_neighbour(&matrix(vec![
            vec![0.0, 9.0, 1.0, 5.0],
            vec![9.0, 0.0, 4.0, 2.0],
            vec![1.0, 4.0, 0.0, 3.0],
            vec![5.0, 2.0, 3.0, 0.0],
        ]));
        assert_eq!(built, vec![0, 2, 3, 1]);
    }

    #[rstest]
    fn ties_resolve_to_the_lowest_index() {
        let built = nearest_neighbour(&matrix(vec![
            vec![0.0, 2.0, 2.0, 2.0],
            vec![2.0, 0.0, 1.0, 1.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![2.0, 1.0, 1.0, 0.0],
        ]));
        assert_eq!(built, vec![0, 1, 2, 3]);
    }
}
