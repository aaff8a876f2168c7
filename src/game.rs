use rand::Rng;
use tracing::{debug, info};

use crate::board::Board;
use crate::fruit::FruitPool;
use crate::input::Input;
use crate::score::{Score, POINTS_FRUIT_EATEN, POINTS_MOVEMENT};
use crate::snake::{Direction::{self, *}, MoveResult, Snake};
use crate::Coords;

pub const COLLISION_DISPLAY_SECS: f32 = 4.0;
const INITIAL_DIRECTION: Direction = Left;

#[derive(Clone, Debug)]
pub struct SnakeGame {
    board: Board,
    snake: Snake,
    fruits: FruitPool,
    score: Score,
}

impl SnakeGame {
    pub fn new(record: u32) -> Self {
        SnakeGame::with_board(Board::new(), record)
    }

    pub fn with_board(mut board: Board, record: u32) -> Self {
        let bounds = board.bounds();
        let snake = Snake::new(bounds, bounds.center(), INITIAL_DIRECTION);
        board.set(snake.head(), true);

        info!(record, "match started");
        SnakeGame { board, snake, fruits: FruitPool::new(), score: Score::new(record) }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruits(&self) -> &FruitPool {
        &self.fruits
    }

    pub fn fruits_mut(&mut self) -> &mut FruitPool {
        &mut self.fruits
    }

    pub fn spawn_fruit_at(&mut self, pos: Coords) -> bool {
        self.fruits.spawn_at(pos, self.board.free_mut())
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.snake.collided() && self.snake.collided_elapsed() > COLLISION_DISPLAY_SECS
    }

    pub fn update<R: Rng + ?Sized>(&mut self, input: Input, dt: f32, rng: &mut R) {
        if self.snake.collided() {
            self.snake.tick_collision(dt);
            return;
        }

        self.handle_input(input);
        self.fruits.update(dt, self.board.free_mut(), rng);

        if self.snake.get_direction() != Idle && self.snake.tick(dt) {
            self.step();
        }
    }

    fn handle_input(&mut self, input: Input) {
        let dir = match input {
            Input::Up => Up,
            Input::Down => Down,
            Input::Left => Left,
            Input::Right => Right,
            _ => return,
        };
        self.snake.set_direction(dir);
    }

    fn step(&mut self) {
        let (head, vacated) = match self.snake.move_step(&mut self.board) {
            MoveResult::Moved { new_head, vacated } => (new_head, vacated),
            MoveResult::Crashed { at, vacated } => (at, vacated),
        };
        // The tail still leaves its cell on a crashing step
        self.resolve_fruits(head, vacated);

        self.board.set(head, true);
        self.score.add(POINTS_MOVEMENT);

        if self.snake.collided() {
            info!(x = head.0, y = head.1, score = self.score.current, length = self.snake.len(), "snake crashed");
        }
    }

    fn resolve_fruits(&mut self, head: Coords, vacated: Coords) {
        for _ in 0..self.fruits.eat_at(head) {
            self.score.add(POINTS_FRUIT_EATEN);
            self.snake.accelerate();
        }

        for _ in 0..self.fruits.release_at(vacated, self.board.free_mut()) {
            self.snake.grow(&mut self.board);
            debug!(length = self.snake.len(), "snake grew");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Bounds;
    use crate::fruit::FruitStatus;
    use crate::snake::SNAKE_SPEED_INIT;
    use rand::{rngs::StdRng, SeedableRng};

    fn quiet_game() -> SnakeGame {
        let mut game = SnakeGame::new(0);
        game.fruits_mut().set_spawn_threshold(f32::MAX);
        game
    }

    #[test]
    fn starts_at_center_heading_left() {
        let game = SnakeGame::new(120);
        assert_eq!(game.snake().head(), (20, 20));
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.snake().get_direction(), Left);
        assert!(game.board().get((20, 20)));
        assert_eq!(game.score(), Score { current: 0, record: 120 });
    }

    #[test]
    fn movement_waits_for_speed_interval() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = quiet_game();

        for _ in 0..3 {
            game.update(Input::None, 0.125, &mut rng);
        }
        assert_eq!(game.snake().head(), (20, 20));

        game.update(Input::None, 0.125, &mut rng);
        assert_eq!(game.snake().head(), (19, 20));
        assert_eq!(game.score().current, POINTS_MOVEMENT);
    }

    #[test]
    fn input_applies_before_the_step() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = quiet_game();

        game.update(Input::Up, SNAKE_SPEED_INIT, &mut rng);
        assert_eq!(game.snake().head(), (20, 19));

        // Reversing is allowed
        game.update(Input::Down, SNAKE_SPEED_INIT, &mut rng);
        assert_eq!(game.snake().head(), (20, 20));
    }

    #[test]
    fn eating_scores_and_grows_one_step_later() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = quiet_game();
        assert!(game.spawn_fruit_at((18, 20)));

        game.update(Input::None, SNAKE_SPEED_INIT, &mut rng);
        game.update(Input::None, SNAKE_SPEED_INIT, &mut rng);
        assert_eq!(game.fruits().fruits()[0].status, FruitStatus::Eaten);
        assert_eq!(game.score().current, 2 * POINTS_MOVEMENT + POINTS_FRUIT_EATEN);
        assert_eq!(game.snake().len(), 1);
        assert!(game.snake().speed() < SNAKE_SPEED_INIT);

        let speed = game.snake().speed();
        game.update(Input::None, speed, &mut rng);
        assert_eq!(game.fruits().fruits()[0].status, FruitStatus::Idle);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().body().collect::<Vec<_>>(), vec![(17, 20), (18, 20)]);
        assert!(!game.board().free().contains((18, 20)));
    }

    #[test]
    fn crashing_step_still_releases_an_eaten_fruit() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = SnakeGame::with_board(Board::with_bounds(Bounds::new(10, 1)), 0);
        game.fruits_mut().set_spawn_threshold(f32::MAX);
        assert_eq!(game.snake().head(), (5, 5));
        assert!(game.spawn_fruit_at((1, 5)));

        for _ in 0..4 {
            game.update(Input::None, game.snake().speed(), &mut rng);
        }
        assert_eq!(game.fruits().fruits()[0].status, FruitStatus::Eaten);

        // Head hits the wall while the tail leaves the fruit cell
        game.update(Input::None, game.snake().speed(), &mut rng);
        assert!(game.snake().collided());
        assert_eq!(game.snake().head(), (0, 5));
        assert_eq!(game.fruits().fruits()[0].status, FruitStatus::Idle);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().tail(), (1, 5));
        assert!(!game.board().free().contains((1, 5)));
        assert_eq!(game.score().current, 5 * POINTS_MOVEMENT + POINTS_FRUIT_EATEN);
    }

    #[test]
    fn crash_freezes_then_completes() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = quiet_game();
        game.update(Input::Up, SNAKE_SPEED_INIT, &mut rng);
        for _ in 0..18 {
            game.update(Input::None, SNAKE_SPEED_INIT, &mut rng);
        }
        assert_eq!(game.snake().head(), (20, 1));
        assert!(!game.snake().collided());

        game.update(Input::None, SNAKE_SPEED_INIT, &mut rng);
        assert!(game.snake().collided());
        assert_eq!(game.snake().head(), (20, 0));
        let score = game.score().current;

        // Frozen: no movement, no input, no points
        game.update(Input::Left, SNAKE_SPEED_INIT, &mut rng);
        assert_eq!(game.snake().head(), (20, 0));
        assert_eq!(game.snake().get_direction(), Up);
        assert_eq!(game.score().current, score);

        game.update(Input::None, 3.0, &mut rng);
        assert!(!game.is_completed());
        game.update(Input::None, 1.0, &mut rng);
        assert!(game.is_completed());
    }
}
