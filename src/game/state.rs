use super::action::Direction;
use super::animation::EasingParams;
use super::config::Difficulty;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fractional coordinates for the interpolation layer
    pub fn to_visual(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

/// Color transition table for the body gradient, indexed by how many foods the
/// snake has eaten so far.
const COLOR_TRANSITIONS: [(u8, u8, u8); 16] = [
    (0, 100, 0),
    (0, 130, 0),
    (0, 160, 0),
    (60, 160, 0),
    (120, 160, 0),
    (180, 160, 0),
    (180, 120, 0),
    (180, 80, 0),
    (220, 80, 0),
    (220, 40, 0),
    (220, 0, 80),
    (180, 0, 160),
    (100, 0, 180),
    (0, 0, 220),
    (0, 100, 220),
    (0, 180, 220),
];

/// The snake: authoritative grid state plus the derived animation state
///
/// `body` is the discrete truth (head at index 0, adjacent cells grid-adjacent
/// at every committed move). `visual_body` is where the snake *looks* like it
/// is, interpolated between `prev_body` and `body` by the animation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Pending direction applied on the next move
    pub direction: Direction,
    /// Direction actually applied on the most recent move; baseline for the
    /// reversal guard
    pub last_direction: Direction,
    /// Single growth flag, set on eating and consumed on the next move
    pub pending_growth: bool,
    /// Increments once per food eaten; drives the cosmetic gradient
    pub color_stage: u32,

    /// Snapshot of `body` taken immediately before the last move
    pub prev_body: Vec<Position>,
    /// Fractional render-facing positions, one per body segment
    pub visual_body: Vec<(f32, f32)>,
    /// Animation progress in [0, 1]; 0 = just moved
    pub progress: f32,
    /// Whether an animation between two grid poses is in flight
    pub animating: bool,

    /// Easing curve for the active difficulty
    pub easing: EasingParams,
}

impl Snake {
    /// Create a snake laid out horizontally behind the head, facing `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];
        let (dx, dy) = direction.delta();

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        let visual_body = body.iter().map(|p| p.to_visual()).collect();
        let prev_body = body.clone();

        Self {
            body,
            direction,
            last_direction: direction,
            pending_growth: false,
            color_stage: 0,
            prev_body,
            visual_body,
            progress: 0.0,
            animating: false,
            easing: Difficulty::Medium.profile().easing,
        }
    }

    /// Select the easing curve matching the session difficulty
    pub fn set_easing(&mut self, easing: EasingParams) {
        self.easing = easing;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Discrete, authoritative body positions
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Interpolated positions for drawing
    pub fn visual_segments(&self) -> &[(f32, f32)] {
        &self.visual_body
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Advance the snake one grid cell in the pending direction.
    ///
    /// Snapshots the body for interpolation, commits the pending direction,
    /// prepends the new head and drops the tail unless growth is pending. A
    /// growing snake duplicates the snapshot's tail so the new segment
    /// animates as appearing in place instead of sliding in from nowhere.
    pub fn advance(&mut self) {
        debug_assert!(!self.body.is_empty(), "snake body must never be empty");

        self.prev_body.clear();
        self.prev_body.extend_from_slice(&self.body);
        self.progress = 0.0;
        self.last_direction = self.direction;

        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.pending_growth {
            self.pending_growth = false;
            if let Some(&tail) = self.prev_body.last() {
                self.prev_body.push(tail);
            }
        } else {
            self.body.pop();
        }

        // Snap on length mismatch, e.g. the first move after growth before the
        // animation has run.
        if self.visual_body.len() != self.body.len() {
            self.visual_body = self.body.iter().map(|p| p.to_visual()).collect();
        }

        self.animating = true;
    }

    /// Change the pending direction, rejecting instantaneous reversals.
    ///
    /// The check runs against `last_direction` rather than the pending
    /// direction, so queuing e.g. Up then Right within one tick keeps the
    /// Right instead of rejecting it against a stale Up.
    pub fn change_direction(&mut self, new_direction: Direction) {
        if !self.last_direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    /// Flag the snake to grow on its next move.
    ///
    /// A single flag, not a counter: calling twice between moves still adds
    /// exactly one segment. Also steps the color gradient.
    pub fn grow(&mut self) {
        self.pending_growth = true;
        self.color_stage += 1;
    }

    /// True iff the head cell appears elsewhere in the body
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body[1..].contains(&head)
    }

    /// True iff the head lies outside `[0, width) x [0, height)`
    pub fn collides_with_bounds(&self, width: usize, height: usize) -> bool {
        let head = self.head();
        head.x < 0 || head.x >= width as i32 || head.y < 0 || head.y >= height as i32
    }

    /// Direction of a body segment as a unit-ish (dx, dy), for head-orientation
    /// rendering. The tail follows the pending direction.
    pub fn segment_direction(&self, index: usize) -> (i32, i32) {
        if index + 1 >= self.body.len() {
            return self.direction.delta();
        }

        let current = self.body[index];
        let next = self.body[index + 1];
        let dx = current.x - next.x;
        let dy = current.y - next.y;

        // Diagonals cannot occur in normal play; pick the dominant axis.
        if dx != 0 && dy != 0 {
            if dx.abs() > dy.abs() {
                return (dx.signum(), 0);
            }
            return (0, dy.signum());
        }

        (dx, dy)
    }

    /// Gradient color for a body segment, a pure function of `color_stage`
    /// and the segment's position along the body.
    pub fn gradient_color(&self, segment_index: usize) -> (u8, u8, u8) {
        let base_index = (self.color_stage as usize).min(COLOR_TRANSITIONS.len() - 1);
        let next_index = (base_index + 1) % COLOR_TRANSITIONS.len();

        let (r1, g1, b1) = COLOR_TRANSITIONS[base_index];
        let (r2, g2, b2) = COLOR_TRANSITIONS[next_index];

        let total_length = self.body.len();
        if total_length <= 1 {
            return (0, 255, 0);
        }

        // 0.0 at the head, approaching 1.0 at the tail, with a sine wave
        // running along the body that shifts as the snake grows.
        let position_factor = segment_index as f32 / total_length as f32;
        let wave =
            (position_factor * 6.0 + self.color_stage as f32 * 0.2).sin() * 0.2 + 0.8;

        let mix = |a: u8, b: u8| -> u8 {
            let value = a as f32 * (1.0 - position_factor) + b as f32 * position_factor * wave;
            value.clamp(0.0, 255.0) as u8
        };

        (mix(r1, r2), mix(g1, g2), mix(b1, b2))
    }

    /// Head color: the first segment's gradient color, brightened
    pub fn head_color(&self) -> (u8, u8, u8) {
        let (r, g, b) = self.gradient_color(0);
        (
            r.saturating_add(50),
            g.saturating_add(50),
            b.saturating_add(50),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32) -> Snake {
        Snake::new(Position::new(x, y), Direction::Right, 3)
    }

    #[test]
    fn test_snake_creation() {
        let snake = snake_at(10, 10);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.body[1], Position::new(9, 10));
        assert_eq!(snake.body[2], Position::new(8, 10));
        assert_eq!(snake.visual_body.len(), 3);
        assert_eq!(snake.prev_body.len(), 3);
        assert!(!snake.animating);
    }

    #[test]
    fn test_advance_without_growth() {
        let mut snake = snake_at(10, 10);
        snake.advance();

        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert!(snake.animating);
        assert_eq!(snake.progress, 0.0);
        // Snapshot holds the pre-move body.
        assert_eq!(snake.prev_body[0], Position::new(10, 10));
    }

    #[test]
    fn test_advance_with_growth() {
        let mut snake = snake_at(10, 10);
        snake.grow();
        snake.advance();

        assert_eq!(snake.len(), 4);
        assert!(!snake.pending_growth);
        // prev_body padded by duplicating its tail so lengths stay matched.
        assert_eq!(snake.prev_body.len(), 4);
        assert_eq!(snake.prev_body[3], snake.prev_body[2]);
        assert_eq!(snake.visual_body.len(), 4);
    }

    #[test]
    fn test_grow_is_idempotent_between_moves() {
        let mut snake = snake_at(10, 10);
        snake.grow();
        snake.grow();
        snake.advance();
        assert_eq!(snake.len(), 4);

        snake.advance();
        assert_eq!(snake.len(), 4);
        // color_stage still counts every call
        assert_eq!(snake.color_stage, 2);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = snake_at(10, 10);
        snake.change_direction(Direction::Left);
        assert_eq!(snake.direction, Direction::Right);

        snake.change_direction(Direction::Up);
        assert_eq!(snake.direction, Direction::Up);
        snake.change_direction(Direction::Down);
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_queued_turns_within_one_tick() {
        // Up then Right before the next move: the guard checks against the
        // last applied direction, so Right must survive.
        let mut snake = snake_at(10, 10);
        snake.change_direction(Direction::Up);
        snake.change_direction(Direction::Right);
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_reversal_guard_tracks_applied_direction() {
        let mut snake = snake_at(10, 10);
        snake.change_direction(Direction::Up);
        snake.advance();
        assert_eq!(snake.last_direction, Direction::Up);

        // Down is now the reversal, Left is not.
        snake.change_direction(Direction::Down);
        assert_eq!(snake.direction, Direction::Up);
        snake.change_direction(Direction::Left);
        assert_eq!(snake.direction, Direction::Left);
    }

    #[test]
    fn test_self_collision() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        assert!(!snake.collides_with_self());

        // Tight clockwise loop: Right, Down, Left, Up lands on own body.
        snake.advance();
        snake.change_direction(Direction::Down);
        snake.advance();
        snake.change_direction(Direction::Left);
        snake.advance();
        snake.change_direction(Direction::Up);
        snake.advance();
        assert!(snake.collides_with_self());
    }

    #[test]
    fn test_bounds_collision_half_open() {
        let mut snake = snake_at(5, 5);
        assert!(!snake.collides_with_bounds(10, 10));

        snake.body[0] = Position::new(0, 0);
        assert!(!snake.collides_with_bounds(10, 10));
        snake.body[0] = Position::new(9, 9);
        assert!(!snake.collides_with_bounds(10, 10));

        snake.body[0] = Position::new(-1, 5);
        assert!(snake.collides_with_bounds(10, 10));
        snake.body[0] = Position::new(10, 5);
        assert!(snake.collides_with_bounds(10, 10));
        snake.body[0] = Position::new(5, -1);
        assert!(snake.collides_with_bounds(10, 10));
        snake.body[0] = Position::new(5, 10);
        assert!(snake.collides_with_bounds(10, 10));
    }

    #[test]
    fn test_move_then_grow_sequence() {
        let mut snake = snake_at(10, 10);
        snake.advance();
        assert_eq!(
            snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );

        snake.grow();
        snake.advance();
        assert_eq!(
            snake.body,
            vec![
                Position::new(12, 10),
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
    }

    #[test]
    fn test_full_grid_traversal_stays_collision_free() {
        // Boustrophedon sweep of a 20x15 grid: across each row, down one,
        // back across. Neither collision query may ever fire.
        let (width, height) = (20usize, 15usize);
        let mut snake = Snake::new(Position::new(2, 0), Direction::Right, 3);

        loop {
            let head = snake.head();
            let going_right = head.y % 2 == 0;

            if going_right && head.x == width as i32 - 1
                || !going_right && head.x == 0
            {
                if head.y == height as i32 - 1 {
                    break;
                }
                snake.change_direction(Direction::Down);
            } else if going_right {
                snake.change_direction(Direction::Right);
            } else {
                snake.change_direction(Direction::Left);
            }

            snake.advance();
            assert!(!snake.collides_with_self(), "self collision at {:?}", snake.head());
            assert!(
                !snake.collides_with_bounds(width, height),
                "bounds collision at {:?}",
                snake.head()
            );
        }

        assert_eq!(snake.head().y, height as i32 - 1);
    }

    #[test]
    fn test_segment_direction() {
        let snake = snake_at(10, 10);
        // Head points away from the segment behind it.
        assert_eq!(snake.segment_direction(0), (1, 0));
        // The tail follows the pending direction.
        assert_eq!(snake.segment_direction(2), Direction::Right.delta());
    }

    #[test]
    fn test_gradient_color_in_range_across_stages() {
        let mut snake = snake_at(10, 10);
        for _ in 0..20 {
            snake.grow();
            snake.advance();
            for i in 0..snake.len() {
                // Conversion clamps; just ensure it never panics and the head
                // stays distinct from the body.
                let _ = snake.gradient_color(i);
            }
            let _ = snake.head_color();
        }
        assert_eq!(snake.color_stage, 20);
    }
}
