//! A thirty-second target game: click the circle to score, avoid the square.

use canvasroot::{Point, ShapeElement};
use std::cell::RefCell;
use std::rc::Rc;

pub const ROUND_SECONDS: u32 = 30;
pub const BOARD_TOP: f32 = 100.0;
const TARGET_RADIUS: f32 = 20.0;
const TARGET_SIDE: f32 = 40.0;
const FIELD: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetShape {
    Circle,
    Square,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub score: i32,
    pub position: Point,
    pub shape: TargetShape,
    pub time_left: u32,
    pub game_over: bool,
    seed: u32,
}

pub type SharedGame = Rc<RefCell<GameState>>;

impl GameState {
    pub fn new(seed: u32) -> Self {
        Self {
            score: 0,
            position: Point::new(100.0, 100.0),
            shape: TargetShape::Circle,
            time_left: ROUND_SECONDS,
            game_over: false,
            seed,
        }
    }

    pub fn shared(seed: u32) -> SharedGame {
        Rc::new(RefCell::new(Self::new(seed)))
    }

    /// Seeded so a scripted round replays the same targets on every run.
    fn next_random(&mut self) -> u32 {
        // Numerical Recipes LCG.
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.seed >> 8
    }

    /// Moves the target somewhere new and picks its shape.
    pub fn relocate(&mut self) {
        self.shape = if self.next_random() % 2 == 0 {
            TargetShape::Circle
        } else {
            TargetShape::Square
        };
        let x = self.next_random() % FIELD;
        let y = self.next_random() % FIELD;
        self.position = Point::new(x as f32, y as f32);
    }

    pub fn hit_target(&mut self) {
        if self.game_over {
            return;
        }
        match self.shape {
            TargetShape::Circle => self.score += 1,
            TargetShape::Square => self.score -= 1,
        }
        self.relocate();
    }

    /// One second of the countdown.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.game_over = true;
        }
    }

    /// Logical point in the middle of the target.
    pub fn target_center(&self) -> Point {
        let origin = Point::new(self.position.x, self.position.y + BOARD_TOP);
        match self.shape {
            TargetShape::Circle => origin,
            TargetShape::Square => {
                Point::new(origin.x + TARGET_SIDE / 2.0, origin.y + TARGET_SIDE / 2.0)
            }
        }
    }
}

/// Builds the scene for the current state. Target clicks write back into `game`.
pub fn scene(game: &SharedGame) -> Vec<ShapeElement> {
    let state = game.borrow();
    let header = ShapeElement::rect(0.0, 0.0, 500.0, 100.0)
        .color("green")
        .child(
            ShapeElement::label(10.0, 30.0, format!("Score: {}", state.score))
                .color("black")
                .font("20px Arial"),
        )
        .child(
            ShapeElement::label(10.0, 60.0, format!("Time: {}s", state.time_left))
                .color("black")
                .font("20px Arial"),
        );

    let board = ShapeElement::rect(0.0, BOARD_TOP, 500.0, 500.0).color("lightgray");
    let board = if state.game_over {
        board.child(
            ShapeElement::label(100.0, 200.0, format!("Game Over! Final Score: {}", state.score))
                .color("red")
                .font("24px Arial"),
        )
    } else {
        let sink = Rc::clone(game);
        let target = match state.shape {
            TargetShape::Circle => {
                ShapeElement::circle(state.position.x, state.position.y, TARGET_RADIUS)
            }
            TargetShape::Square => ShapeElement::rect(
                state.position.x,
                state.position.y,
                TARGET_SIDE,
                TARGET_SIDE,
            ),
        };
        board.child(
            target
                .id("target")
                .color("blue")
                .on_click(move |_| sink.borrow_mut().hit_target()),
        )
    };

    vec![header, board]
}
