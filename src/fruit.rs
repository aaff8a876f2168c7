use std::ops::Range;

use rand::Rng;
use tracing::debug;

use crate::board::FreeCells;
use crate::Coords;

pub const FRUIT_POOL_SIZE: usize = 6;
pub const FRUIT_LIFETIME: f32 = 15.0;
pub const SPAWN_DELAY: Range<f32> = 3.0..6.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FruitStatus {
    Idle,
    Active,
    Eaten,
}

#[derive(Copy, Clone, Debug)]
pub struct Fruit {
    pub pos: Coords,
    pub lifetime: f32,
    pub elapsed: f32,
    pub status: FruitStatus,
}

impl Default for Fruit {
    fn default() -> Self {
        Fruit { pos: (0, 0), lifetime: FRUIT_LIFETIME, elapsed: 0.0, status: FruitStatus::Idle }
    }
}

impl Fruit {
    pub fn is_reserving(&self) -> bool {
        self.status != FruitStatus::Idle
    }
}

/// Fixed set of fruit slots sharing one spawn timer. The timer only restarts when a
/// slot is activated (or an activation is skipped for lack of room).
#[derive(Clone, Debug)]
pub struct FruitPool {
    fruits: [Fruit; FRUIT_POOL_SIZE],
    elapsed: f32,
    spawn_threshold: f32,
}

impl FruitPool {
    pub fn new() -> Self {
        FruitPool { fruits: [Fruit::default(); FRUIT_POOL_SIZE], elapsed: 0.0, spawn_threshold: 0.0 }
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn set_spawn_threshold(&mut self, seconds: f32) {
        self.spawn_threshold = seconds;
    }

    pub fn spawn_threshold(&self) -> f32 {
        self.spawn_threshold
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, free: &mut FreeCells, rng: &mut R) {
        self.elapsed += dt;

        for slot in 0..self.fruits.len() {
            let fruit = &mut self.fruits[slot];

            match fruit.status {
                FruitStatus::Active => {
                    fruit.elapsed += dt;
                    if fruit.elapsed > fruit.lifetime {
                        fruit.status = FruitStatus::Idle;
                        free.add(fruit.pos);
                        debug!(slot, x = fruit.pos.0, y = fruit.pos.1, "fruit expired");
                    }
                }
                FruitStatus::Idle if self.elapsed > self.spawn_threshold => {
                    self.elapsed = 0.0;
                    self.spawn_threshold = rng.gen_range(SPAWN_DELAY);

                    match free.pick_random(rng) {
                        Some(pos) => self.activate(slot, pos, free),
                        None => debug!(slot, "no free cell, fruit spawn skipped"),
                    }
                }
                _ => {}
            }
        }
    }

    /// Activates the first idle slot on `pos`, which must be a free cell.
    /// Returns `false` when every slot is busy or the cell is not free.
    pub fn spawn_at(&mut self, pos: Coords, free: &mut FreeCells) -> bool {
        if !free.contains(pos) {
            return false;
        }

        match self.fruits.iter().position(|f| f.status == FruitStatus::Idle) {
            Some(slot) => {
                self.activate(slot, pos, free);
                true
            }
            None => false,
        }
    }

    pub fn eat_at(&mut self, head: Coords) -> usize {
        let mut eaten = 0;

        for (slot, fruit) in self.fruits.iter_mut().enumerate() {
            if fruit.status == FruitStatus::Active && fruit.pos == head {
                fruit.status = FruitStatus::Eaten;
                eaten += 1;
                debug!(slot, x = head.0, y = head.1, "fruit eaten");
            }
        }

        eaten
    }

    /// Retires eaten fruits whose cell the tail just left, handing the cell back to
    /// the pool. Returns how many segments the snake should grow by.
    pub fn release_at(&mut self, vacated: Coords, free: &mut FreeCells) -> usize {
        let mut released = 0;

        for fruit in self.fruits.iter_mut() {
            if fruit.status == FruitStatus::Eaten && fruit.pos == vacated {
                fruit.status = FruitStatus::Idle;
                free.add(fruit.pos);
                released += 1;
            }
        }

        released
    }

    fn activate(&mut self, slot: usize, pos: Coords, free: &mut FreeCells) {
        free.remove(pos);

        let fruit = &mut self.fruits[slot];
        fruit.pos = pos;
        fruit.elapsed = 0.0;
        fruit.lifetime = FRUIT_LIFETIME;
        fruit.status = FruitStatus::Active;
        debug!(slot, x = pos.0, y = pos.1, "fruit spawned");
    }
}

impl Default for FruitPool {
    fn default() -> Self {
        FruitPool::new()
    }
}
