use std::collections::{HashSet, VecDeque};

use super::types::{Direction, GridSize, Point};

/// Snake body, head first. `body_set` mirrors `body` for occupancy checks and
/// `head` always equals the front of `body`.
#[derive(Clone, Debug)]
pub struct Snake {
    head: Point,
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Builds a straight snake of `length` cells whose head is `head` and
    /// whose tail trails away from `direction`, wrapping on the grid.
    pub fn new(head: Point, direction: Direction, length: usize, grid: GridSize) -> Self {
        let (dx, dy): (i64, i64) = match direction.opposite() {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        };

        let width = grid.width as i64;
        let height = grid.height as i64;
        let rest = (1..length.max(1) as i64).map(|i| {
            Point::new(
                (head.x as i64 + dx * i).rem_euclid(width) as usize,
                (head.y as i64 + dy * i).rem_euclid(height) as usize,
            )
        });

        Self::from_segments(head, rest)
    }

    /// Builds a snake from its head and the remaining segments, head side
    /// first. Cells already in the body are skipped.
    pub fn from_segments(head: Point, rest: impl IntoIterator<Item = Point>) -> Self {
        let mut body = VecDeque::from([head]);
        let mut body_set = HashSet::from([head]);
        for segment in rest {
            if body_set.insert(segment) {
                body.push_back(segment);
            }
        }
        Self {
            head,
            body,
            body_set,
        }
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn tail(&self) -> Point {
        self.body.back().copied().unwrap_or(self.head)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub(super) fn push_head(&mut self, head: Point) {
        self.head = head;
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    pub(super) fn pop_tail(&mut self) {
        if self.body.len() > 1
            && let Some(tail) = self.body.pop_back()
        {
            self.body_set.remove(&tail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trails_behind_head() {
        let snake = Snake::new(Point::new(10, 10), Direction::Right, 3, GridSize::new(20, 20));
        let segments: Vec<Point> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
        );
    }

    #[test]
    fn test_new_wraps_tail_across_edge() {
        let snake = Snake::new(Point::new(0, 4), Direction::Right, 3, GridSize::new(10, 10));
        assert_eq!(snake.tail(), Point::new(8, 4));
    }

    #[test]
    fn test_push_and_pop_keep_set_in_sync() {
        let mut snake = Snake::from_segments(Point::new(2, 2), [Point::new(1, 2)]);
        snake.push_head(Point::new(3, 2));
        snake.pop_tail();

        assert_eq!(snake.len(), 2);
        assert!(snake.contains(&Point::new(3, 2)));
        assert!(!snake.contains(&Point::new(1, 2)));
        assert_eq!(snake.head(), Point::new(3, 2));
        assert_eq!(snake.tail(), Point::new(2, 2));
    }

    #[test]
    fn test_pop_tail_never_empties_body() {
        let mut snake = Snake::from_segments(Point::new(0, 0), std::iter::empty());
        snake.pop_tail();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.tail(), snake.head());
    }

    #[test]
    fn test_from_segments_skips_duplicates() {
        let snake = Snake::from_segments(
            Point::new(1, 1),
            [Point::new(1, 2), Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)],
        );
        let segments: Vec<Point> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)]
        );
    }
}
