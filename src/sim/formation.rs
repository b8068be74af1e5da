//! Enemy formation: columns of stacks
//!
//! Columns keep the index they were built with for the whole match. A column
//! that loses its last enemy stays in place as an empty placeholder, so the
//! index reported with a hit always names the same column.

use serde::{Deserialize, Serialize};

use super::entity::{Enemy, EntityId};

/// One column; `stack[0]` is the front member (closest to the player)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    index: usize,
    stack: Vec<Enemy>,
}

impl Column {
    /// Stable column index assigned at build time
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Front member, the only one that can be hit or fire
    pub fn front(&self) -> Option<&Enemy> {
        self.stack.first()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.stack
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Remove a member by id; the next member becomes front when the front goes
    pub fn remove(&mut self, id: EntityId) -> Option<Enemy> {
        let pos = self.stack.iter().position(|e| e.id == id)?;
        Some(self.stack.remove(pos))
    }
}

/// Horizontal extent of the surviving formation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f32,
    pub max_x: f32,
}

/// Ordered columns, left to right
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Formation {
    columns: Vec<Column>,
}

impl Formation {
    /// Build from stacks (front first); each column records its position here
    pub fn new(stacks: Vec<Vec<Enemy>>) -> Self {
        let columns = stacks
            .into_iter()
            .enumerate()
            .map(|(index, stack)| Column { index, stack })
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Front member of every non-empty column, in column order
    pub fn front_line(&self) -> impl Iterator<Item = (usize, &Enemy)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.front().map(|enemy| (c.index, enemy)))
    }

    /// Every member of every stack
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.columns.iter().flat_map(|c| c.stack.iter())
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut Enemy> + '_ {
        self.columns.iter_mut().flat_map(|c| c.stack.iter_mut())
    }

    /// Remove an enemy from its column. A second call for the same id is a no-op.
    pub fn remove_enemy(&mut self, column: usize, id: EntityId) -> Option<Enemy> {
        self.columns.get_mut(column)?.remove(id)
    }

    pub fn enemy_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// True once every column is empty
    pub fn is_cleared(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    /// Left edge of the leftmost surviving column's front member and right
    /// edge of the rightmost one's. `None` when no column survives.
    pub fn horizontal_extent(&self) -> Option<Extent> {
        let first = self.columns.iter().find_map(Column::front)?;
        let last = self.columns.iter().rev().find_map(Column::front)?;
        Some(Extent {
            min_x: first.body.left(),
            max_x: last.body.right(),
        })
    }

    /// Lowest front-member origin y, i.e. how far the formation has come
    /// down toward the player. `None` when no column survives.
    pub fn lowest_y(&self) -> Option<f32> {
        self.front_line()
            .map(|(_, enemy)| enemy.body.origin.y)
            .reduce(f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Body;
    use glam::Vec2;

    fn grid(columns: usize, rows: usize) -> Formation {
        let mut id = 0;
        let stacks: Vec<Vec<Enemy>> = (0..columns)
            .map(|i| {
                (0..rows)
                    .map(|j| {
                        id += 1;
                        Enemy {
                            id,
                            body: Body::new(
                                Vec2::new(i as f32 * 65.0, 300.0 + j as f32 * 65.0),
                                50.0,
                                40.0,
                                0.0,
                            ),
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Formation::new(stacks)
    }

    #[test]
    fn test_front_line_one_per_column() {
        let formation = grid(4, 3);
        let fronts: Vec<_> = formation.front_line().map(|(i, e)| (i, e.id)).collect();
        assert_eq!(fronts, vec![(0, 1), (1, 4), (2, 7), (3, 10)]);
    }

    #[test]
    fn test_remove_front_promotes_next() {
        let mut formation = grid(3, 3);
        let removed = formation.remove_enemy(1, 4).unwrap();
        assert_eq!(removed.id, 4);
        assert_eq!(formation.column(1).unwrap().front().unwrap().id, 5);
        // Neighbours untouched
        assert_eq!(formation.column(0).unwrap().front().unwrap().id, 1);
        assert_eq!(formation.column(2).unwrap().front().unwrap().id, 7);
        assert_eq!(formation.column(2).unwrap().index(), 2);
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut formation = grid(2, 2);
        assert!(formation.remove_enemy(0, 1).is_some());
        assert!(formation.remove_enemy(0, 1).is_none());
        assert!(formation.remove_enemy(9, 1).is_none());
        assert_eq!(formation.enemy_count(), 3);
    }

    #[test]
    fn test_empty_column_keeps_its_slot() {
        let mut formation = grid(3, 1);
        formation.remove_enemy(1, 2);
        assert_eq!(formation.columns().len(), 3);
        assert!(formation.column(1).unwrap().is_empty());
        let fronts: Vec<_> = formation.front_line().map(|(i, _)| i).collect();
        assert_eq!(fronts, vec![0, 2]);
    }

    #[test]
    fn test_extent_skips_empty_edge_columns() {
        let mut formation = grid(3, 1);
        assert_eq!(
            formation.horizontal_extent(),
            Some(Extent {
                min_x: 0.0,
                max_x: 180.0
            })
        );
        formation.remove_enemy(0, 1);
        formation.remove_enemy(2, 3);
        assert_eq!(
            formation.horizontal_extent(),
            Some(Extent {
                min_x: 65.0,
                max_x: 115.0
            })
        );
    }

    #[test]
    fn test_cleared_formation_has_no_extent() {
        let mut formation = grid(2, 1);
        formation.remove_enemy(0, 1);
        formation.remove_enemy(1, 2);
        assert!(formation.is_cleared());
        assert_eq!(formation.horizontal_extent(), None);
        assert_eq!(formation.lowest_y(), None);
        assert!(Formation::default().horizontal_extent().is_none());
    }

    #[test]
    fn test_lowest_y_tracks_front_members() {
        let mut formation = grid(2, 2);
        assert_eq!(formation.lowest_y(), Some(300.0));
        formation.remove_enemy(0, 1);
        formation.remove_enemy(1, 3);
        assert_eq!(formation.lowest_y(), Some(365.0));
    }
}
