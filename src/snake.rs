use crate::board::{Board, Bounds};
use crate::Coords;
use Direction::*;
use MoveResult::*;

pub const SNAKE_SPEED_INIT: f32 = 0.5;
pub const SNAKE_SPEED_MAX: f32 = 0.1;
pub const SNAKE_ACCELERATION: f32 = 0.01;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Coords {
        match self {
            Idle => (0, 0),
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MoveResult {
    Moved { new_head: Coords, vacated: Coords },
    Crashed { at: Coords, vacated: Coords },
}

#[derive(Copy, Clone, Debug, Default)]
struct Node {
    pos: Coords,
    prev_pos: Coords,
    // towards the head
    ahead: Option<usize>,
    // towards the tail
    behind: Option<usize>,
}

/// Snake body stored in a fixed arena of `cell_count` nodes. Slots `0..length` are
/// the grown segments; `head` and `tail` are arena indices that move around as the
/// tail node is relinked to the front on every step.
#[derive(Clone, Debug)]
pub struct Snake {
    bounds: Bounds,
    nodes: Vec<Node>,
    head: usize,
    tail: usize,
    length: usize,
    direction: Direction,
    speed: f32,
    elapsed: f32,
    collided: bool,
    collided_elapsed: f32,
}

impl Snake {
    pub fn new(bounds: Bounds, pos: Coords, direction: Direction) -> Self {
        let mut nodes = vec![Node::default(); bounds.cell_count()];
        nodes[0].pos = pos;
        nodes[0].prev_pos = pos;

        Snake {
            bounds,
            nodes,
            head: 0,
            tail: 0,
            length: 1,
            direction,
            speed: SNAKE_SPEED_INIT,
            elapsed: 0.0,
            collided: false,
            collided_elapsed: 0.0,
        }
    }

    pub fn head(&self) -> Coords {
        self.nodes[self.head].pos
    }

    pub fn tail(&self) -> Coords {
        self.nodes[self.tail].pos
    }

    pub fn vacated(&self) -> Coords {
        self.nodes[self.tail].prev_pos
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn body(&self) -> Body<'_> {
        Body { snake: self, next: Some(self.head) }
    }

    // Reversals are not filtered; with three or more segments they run into the neck
    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn accelerate(&mut self) {
        if self.speed > SNAKE_SPEED_MAX {
            self.speed = (self.speed - SNAKE_ACCELERATION).max(SNAKE_SPEED_MAX);
        }
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.speed {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn collided(&self) -> bool {
        self.collided
    }

    pub fn collided_elapsed(&self) -> f32 {
        self.collided_elapsed
    }

    pub fn tick_collision(&mut self, dt: f32) {
        if self.collided {
            self.collided_elapsed += dt;
        }
    }

    /// Moves the snake one cell. The tail cell is freed first, so heading into the
    /// cell the tail is leaving is not a crash. The new head cell is left for the
    /// caller to mark occupied once fruits have been resolved.
    pub fn move_step(&mut self, board: &mut Board) -> MoveResult {
        let vacated = self.tail();
        board.set(vacated, false);
        self.nodes[self.tail].prev_pos = vacated;

        // Only a snake longer than one segment has a tail with a predecessor
        if let Some(new_tail) = self.nodes[self.tail].ahead {
            // Relink the tail node in front of the head
            let old_head = self.head;
            let moved = self.tail;

            self.nodes[new_tail].behind = None;
            self.nodes[moved].ahead = None;
            self.nodes[moved].behind = Some(old_head);
            self.nodes[old_head].ahead = Some(moved);
            self.nodes[moved].pos = self.nodes[old_head].pos;
            self.nodes[new_tail].prev_pos = vacated;

            self.head = moved;
            self.tail = new_tail;
        }

        let (dx, dy) = self.direction.delta();
        let old = self.nodes[self.head].pos;
        let new_head = (old.0 + dx, old.1 + dy);
        self.nodes[self.head].pos = new_head;

        self.collided = self.bounds.is_border(new_head) || board.get(new_head);

        if self.collided {
            Crashed { at: new_head, vacated }
        } else {
            Moved { new_head, vacated }
        }
    }

    /// Appends a segment on the cell the tail vacated on the latest step. If the head
    /// moved into that same cell, it bites the new segment and the snake crashes.
    pub fn grow(&mut self, board: &mut Board) {
        let pos = self.vacated();
        let slot = self.length;
        debug_assert!(slot < self.nodes.len(), "arena is sized for a full board");

        self.nodes[slot] = Node { pos, prev_pos: pos, ahead: Some(self.tail), behind: None };
        self.nodes[self.tail].behind = Some(slot);
        self.tail = slot;
        self.length += 1;

        board.set(pos, true);
        if pos == self.head() {
            self.collided = true;
        }
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '┌',
            Down => '┘',
            Left | Idle => '└',
            Right => '┐',
        }
    }
}

pub struct Body<'a> {
    snake: &'a Snake,
    next: Option<usize>,
}

impl<'a> Iterator for Body<'a> {
    type Item = Coords;

    fn next(&mut self) -> Option<Coords> {
        let node = &self.snake.nodes[self.next?];
        self.next = node.behind;
        Some(node.pos)
    }
}
