use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

/// Segments this close to the head can never be bitten.
const SELF_COLLISION_EXEMPT: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }

    fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    pending_direction: Option<Direction>,
    vacated: Option<Coords>,
    step: i32,
    capacity: usize,
}

impl Snake {
    /// Builds a snake with its head at `head` and the rest of the body trailing
    /// behind it, `step` pixels apart.
    pub fn new(head: Coords, size: usize, direction: Direction, step: i32, capacity: usize) -> Self {
        let diff = direction.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 - diff.0 * step * i, head.1 - diff.1 * step * i))
            .collect();
        Snake { body, direction, pending_direction: None, vacated: None, step, capacity }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, direction: Direction, step: i32, capacity: usize) -> Self {
        Snake { body: body.into(), direction, pending_direction: None, vacated: None, step, capacity }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Buffers a turn for the next step. Turning back onto the neck is
    /// refused, judged against the direction of the last step taken.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if !new_direction.is_opposite(&self.direction) {
            self.pending_direction = Some(new_direction);
        }
    }

    /// Shifts every segment into its predecessor's place and moves the head one
    /// cell. Returns the new head.
    pub fn move_step(&mut self) -> Coords {
        if let Some(dir) = self.pending_direction.take() {
            self.direction = dir;
        }

        let (dx, dy) = self.direction.delta();
        let old_head = self.head();
        let new_head = (old_head.0 + dx * self.step, old_head.1 + dy * self.step);

        self.body.push_front(new_head);
        self.vacated = self.body.pop_back();

        new_head
    }

    /// Re-attaches the cell the tail just left.
    pub fn grow(&mut self) {
        if self.body.len() >= self.capacity {
            return;
        }

        if let Some(tail) = self.vacated.take() {
            self.body.push_back(tail);
        }
    }

    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(SELF_COLLISION_EXEMPT).any(|pos| *pos == head)
    }
}
