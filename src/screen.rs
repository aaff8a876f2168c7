use std::io;
use std::mem;

use crossterm::style::Color;
use rand::Rng;
use tracing::{error, info, warn};

use crate::assets::Assets;
use crate::fruit::FruitStatus;
use crate::game::SnakeGame;
use crate::input::Input;
use crate::score::{Score, ScoreStore};
use crate::snake::Direction;
use crate::term::TermManager;
use crate::TermInt;

const SPLASH_WIDTH: TermInt = 46;
const SPLASH_HEIGHT: TermInt = 17;
const SPLASH_SNAKE_ROWS: usize = 9;
const LABEL_START: &str = "Press ENTER to start";
const LABEL_AGAIN: &str = "Press ENTER to play again";
const RESULT_WIDTH: TermInt = 60;

const BOARD_COLS: TermInt = 80;
const BOARD_ROWS: TermInt = 40;
const SCORE_WIDTH: TermInt = 80;

const SNAKE_BODY_CHAR: char = '▒';
const FRUIT_CHAR: char = '◆';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScreenKind {
    Init,
    Game,
    Result,
}

impl ScreenKind {
    pub fn next(self) -> ScreenKind {
        match self {
            ScreenKind::Init | ScreenKind::Result => ScreenKind::Game,
            ScreenKind::Game => ScreenKind::Result,
        }
    }
}

fn blink_on(elapsed: f32) -> bool {
    (elapsed * 4.0) as u32 % 2 == 1
}

#[derive(Clone, Debug, Default)]
pub struct InitScreen {
    elapsed: f32,
    enter_pressed: bool,
}

impl InitScreen {
    fn update(&mut self, input: Input, dt: f32) {
        self.elapsed += dt;
        self.enter_pressed |= input == Input::Enter;
    }

    fn is_completed(&self) -> bool {
        self.enter_pressed
    }

    fn show_label(&self) -> bool {
        !self.enter_pressed && blink_on(self.elapsed)
    }

    fn render(&self, term: &mut TermManager, assets: &Assets) {
        let (ox, oy) = term.centered_origin(SPLASH_WIDTH, SPLASH_HEIGHT);

        for (row, line) in assets.splash.lines().enumerate() {
            let color = if row < SPLASH_SNAKE_ROWS { Color::Green } else { Color::Red };
            term.print_str(ox, oy + row as i32, line, color);
        }

        if self.show_label() {
            let (lx, _) = term.centered_origin(LABEL_START.len() as TermInt, 1);
            term.print_str(lx, oy + SPLASH_HEIGHT as i32, LABEL_START, Color::Reset);
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResultScreen {
    elapsed: f32,
    enter_pressed: bool,
    score: Score,
}

impl ResultScreen {
    fn new(score: Score) -> Self {
        ResultScreen { elapsed: 0.0, enter_pressed: false, score }
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn summary(&self) -> String {
        if self.score.is_record() {
            format!("New record: {}", self.score.current)
        } else {
            format!("Score: {}   Record: {}", self.score.current, self.score.record)
        }
    }

    fn update(&mut self, input: Input, dt: f32) {
        self.elapsed += dt;
        self.enter_pressed |= input == Input::Enter;
    }

    fn is_completed(&self) -> bool {
        self.enter_pressed
    }

    fn render(&self, term: &mut TermManager, assets: &Assets) {
        let art: Vec<&str> = assets.game_over.lines().collect();
        let height = art.len() as TermInt + 4;
        let (_, oy) = term.centered_origin(RESULT_WIDTH, height);

        for (row, line) in art.iter().enumerate() {
            let (lx, _) = term.centered_origin(line.chars().count() as TermInt, 1);
            term.print_str(lx, oy + row as i32, line, Color::Red);
        }

        let summary = self.summary();
        let color = if self.score.is_record() { Color::Green } else { Color::Reset };
        let (sx, _) = term.centered_origin(summary.len() as TermInt, 1);
        term.print_str(sx, oy + art.len() as i32 + 1, &summary, color);

        if blink_on(self.elapsed) {
            let (lx, _) = term.centered_origin(LABEL_AGAIN.len() as TermInt, 1);
            term.print_str(lx, oy + art.len() as i32 + 3, LABEL_AGAIN, Color::Reset);
        }
    }
}

pub enum Screen {
    Init(InitScreen),
    Game(Box<SnakeGame>),
    Result(ResultScreen),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Init(_) => ScreenKind::Init,
            Screen::Game(_) => ScreenKind::Game,
            Screen::Result(_) => ScreenKind::Result,
        }
    }

    fn update<R: Rng + ?Sized>(&mut self, input: Input, dt: f32, rng: &mut R) {
        match self {
            Screen::Init(screen) => screen.update(input, dt),
            Screen::Game(game) => game.update(input, dt, rng),
            Screen::Result(screen) => screen.update(input, dt),
        }
    }

    fn is_completed(&self) -> bool {
        match self {
            Screen::Init(screen) => screen.is_completed(),
            Screen::Game(game) => game.is_completed(),
            Screen::Result(screen) => screen.is_completed(),
        }
    }

    fn render(&self, term: &mut TermManager, assets: &Assets) {
        match self {
            Screen::Init(screen) => screen.render(term, assets),
            Screen::Game(game) => render_game(game, term),
            Screen::Result(screen) => screen.render(term, assets),
        }
    }
}

pub struct App<S: ScoreStore> {
    screen: Screen,
    score: Score,
    store: S,
}

impl<S: ScoreStore> App<S> {
    pub fn new(store: S) -> Self {
        let record = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable score, starting without a record");
            0
        });

        App { screen: Screen::Init(InitScreen::default()), score: Score::new(record), store }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn update<R: Rng + ?Sized>(&mut self, input: Input, dt: f32, rng: &mut R) {
        self.screen.update(input, dt, rng);

        if self.screen.is_completed() {
            let next = self.screen.kind().next();
            self.dispose();
            self.screen = self.enter(next);
        }
    }

    pub fn render(&self, term: &mut TermManager, assets: &Assets) -> io::Result<()> {
        term.clear();
        self.screen.render(term, assets);
        term.present()
    }

    /// Calls `frame` until it returns `false` or an error. The active screen is
    /// disposed either way, so a match in progress still gets its record saved.
    pub fn run_frames<E, F>(&mut self, mut frame: F) -> Result<(), E>
    where
        F: FnMut(&mut Self) -> Result<bool, E>,
    {
        let res = loop {
            match frame(self) {
                Ok(true) => {}
                Ok(false) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.shutdown();
        res
    }

    pub fn shutdown(&mut self) {
        self.dispose();
        self.screen = Screen::Init(InitScreen::default());
    }

    fn enter(&self, kind: ScreenKind) -> Screen {
        match kind {
            ScreenKind::Init => Screen::Init(InitScreen::default()),
            ScreenKind::Game => Screen::Game(Box::new(SnakeGame::new(self.score.record))),
            ScreenKind::Result => Screen::Result(ResultScreen::new(self.score)),
        }
    }

    fn dispose(&mut self) {
        let placeholder = Screen::Init(InitScreen::default());
        if let Screen::Game(game) = mem::replace(&mut self.screen, placeholder) {
            self.finish_match(game.score());
        }
    }

    fn finish_match(&mut self, score: Score) {
        self.score = score;
        let beaten = self.score.commit_record();
        info!(score = score.current, record = self.score.record, beaten, "match finished");

        if beaten {
            if let Err(e) = self.store.save(self.score.record) {
                error!(error = %e, "failed to persist record");
            }
        }
    }
}

fn render_game(game: &SnakeGame, term: &mut TermManager) {
    let (ox, oy) = term.centered_origin(BOARD_COLS, BOARD_ROWS);
    let score = game.score();

    // Score line sits right above the board
    let max_score = format!("Max score: {}", score.record);
    let current_score = format!("Current score: {}", score.current);
    term.print_str(ox + 1, oy - 1, &max_score, Color::Reset);
    term.print_str(ox + SCORE_WIDTH as i32 - current_score.len() as i32 - 1, oy - 1, &current_score, Color::Reset);

    term.draw_box(ox, oy, BOARD_COLS, BOARD_ROWS, Color::Green);

    // Logical cells are two terminal columns wide
    let at = |x: i16, y: i16| (ox + x as i32 * 2, oy + y as i32);

    for fruit in game.fruits().fruits() {
        if fruit.status == FruitStatus::Active {
            let (x, y) = at(fruit.pos.0, fruit.pos.1);
            term.print_at(x, y, FRUIT_CHAR, Color::Reset);
        }
    }

    let snake = game.snake();
    let (hx, hy) = at(snake.head().0, snake.head().1);
    let (tx, ty) = match snake.get_direction() {
        Direction::Up => (hx + 1, hy - 1),
        Direction::Down => (hx, hy + 1),
        Direction::Left | Direction::Idle => (hx - 1, hy),
        Direction::Right => (hx + 2, hy),
    };
    term.print_at(tx, ty, snake.head_char(), Color::Red);

    let flashing = snake.collided() && (snake.collided_elapsed() * 5.0) as u32 % 2 == 1;
    let color = if flashing { Color::Red } else { Color::Green };
    for (x, y) in snake.body() {
        let (cx, cy) = at(x, y);
        term.print_at(cx, cy, SNAKE_BODY_CHAR, color);
        term.print_at(cx + 1, cy, SNAKE_BODY_CHAR, color);
    }
}
