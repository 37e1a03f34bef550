//! The l_system module provides a simple Lindenmayer rewriting system that
//! drives a [`crate::turtle::Turtle`]. Take a look at the
//! [`crate::l_system::LSystem`] struct for more details, and examples.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::CanvasError;
use crate::turtle::{Turtle, TurtleCommand};

/// # LSystem
///
/// What it says on the box; an axiom, a set of per-character rewrite rules,
/// and a set of per-character turtle commands.
///
/// # Example
///
/// ```rust
/// use lsys_render::canvas::Canvas;
/// use lsys_render::geometry::Bounds2d;
/// use lsys_render::l_system::LSystem;
/// use lsys_render::turtle::{Transform2d, Turtle, TurtleCommand};
///
/// let mut koch = LSystem::new("F");
/// koch.add_rule('F', "F+F-F-F+F");
/// koch.add_symbol('F', Some(TurtleCommand::MoveForward(1.0)));
/// koch.add_symbol('+', Some(TurtleCommand::Turn(90)));
/// koch.add_symbol('-', Some(TurtleCommand::Turn(-90)));
/// koch.evaluate(2);
/// assert_eq!(koch.evaluated_axiom().len(), 49);
///
/// let mut canvas = Canvas::new(Bounds2d::default(), 128, 64).unwrap();
/// let mut turtle = Turtle::new(Transform2d::default(), &mut canvas);
/// koch.draw(&mut turtle).unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct LSystem {
    axiom: String,
    rules: HashMap<char, String>,
    symbols: HashMap<char, Option<TurtleCommand>>,
    evaluated_axiom: String,
    is_evaluated: bool,
}

impl LSystem {
    pub fn new(axiom: &str) -> LSystem {
        LSystem {
            axiom: axiom.to_string(),
            ..LSystem::default()
        }
    }

    /// One generation: every character of `state` is replaced by its rule, or
    /// kept as-is if it has none.
    fn rewrite(&self, state: &str) -> String {
        state
            .chars()
            .map(|c| match self.rules.get(&c) {
                Some(replacement) => replacement.clone(),
                None => String::from(c),
            })
            .collect()
    }

    /// #expand
    ///
    /// Expands the L-system by the requested "order" of iterations without
    /// touching the cached evaluation.
    pub fn expand(&self, order: u32) -> String {
        let mut state = self.axiom.clone();
        for _ in 0..order {
            let new_state = self.rewrite(&state);
            // A fixed point stays fixed for every later generation.
            if new_state == state {
                break;
            }
            state = new_state;
        }
        state
    }

    /// Rewrite the axiom `iterations` times and cache the result. Does
    /// nothing if a cached evaluation already exists.
    pub fn evaluate(&mut self, iterations: u32) {
        if self.is_evaluated {
            return;
        }
        self.evaluated_axiom = self.expand(iterations);
        self.is_evaluated = true;
        debug!(
            iterations,
            length = self.evaluated_axiom.len(),
            "evaluated l-system"
        );
    }

    /// Queue one command per symbol of the evaluated string on `turtle` and
    /// run it. Characters without a command are skipped. Does nothing until
    /// [`LSystem::evaluate`] has been called.
    pub fn draw(&self, turtle: &mut Turtle<'_>) -> Result<(), CanvasError> {
        if !self.is_evaluated {
            return Ok(());
        }

        turtle.clear_commands();
        turtle.reset_transform();
        for command in self.commands() {
            turtle.add_command(command);
        }
        turtle.run()
    }

    /// The command sequence the evaluated string maps to.
    pub fn commands(&self) -> impl Iterator<Item = TurtleCommand> + '_ {
        self.evaluated_axiom
            .chars()
            .filter_map(move |c| self.symbols.get(&c).copied().flatten())
    }

    /// Bind a character to a turtle command, or to nothing. The first
    /// binding for a character wins.
    pub fn add_symbol(&mut self, character: char, command: Option<TurtleCommand>) {
        if self.symbols.contains_key(&character) {
            return;
        }
        self.symbols.insert(character, command);
        self.is_evaluated = false;
    }

    /// Add a rewrite rule. The first rule for a character wins.
    pub fn add_rule(&mut self, character: char, replacement: &str) {
        if self.rules.contains_key(&character) {
            return;
        }
        self.rules.insert(character, replacement.to_string());
        self.is_evaluated = false;
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn set_axiom(&mut self, axiom: &str) {
        self.axiom = axiom.to_string();
        self.is_evaluated = false;
    }

    pub fn evaluated_axiom(&self) -> &str {
        &self.evaluated_axiom
    }

    pub fn is_evaluated(&self) -> bool {
        self.is_evaluated
    }

    pub fn symbols(&self) -> &HashMap<char, Option<TurtleCommand>> {
        &self.symbols
    }

    pub fn set_symbols(&mut self, symbols: HashMap<char, Option<TurtleCommand>>) {
        self.symbols = symbols;
        self.is_evaluated = false;
    }

    pub fn rules(&self) -> &HashMap<char, String> {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: HashMap<char, String>) {
        self.rules = rules;
        self.is_evaluated = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::Canvas;
    use crate::geometry::Bounds2d;
    use crate::turtle::Transform2d;

    fn koch() -> LSystem {
        let mut system = LSystem::new("F");
        system.add_rule('F', "F+F-F-F+F");
        system
    }

    #[test]
    fn test_expand_simple() {
        let mut system = LSystem::new("A");
        system.set_rules(HashMap::from([
            ('A', "AB".to_string()),
            ('B', "A".to_string()),
        ]));
        assert_eq!(system.expand(2), "ABA");
        assert_eq!(system.expand(5), "ABAABABAABAAB");
    }

    #[test]
    fn test_binary_tree_one_generation() {
        let mut system = LSystem::new("0");
        system.add_rule('0', "1[+0]-0");
        system.add_rule('1', "11");
        system.evaluate(1);
        assert_eq!(system.evaluated_axiom(), "1[+0]-0");
    }

    #[test]
    fn test_koch_lengths() {
        let mut system = koch();
        system.evaluate(1);
        assert_eq!(system.evaluated_axiom(), "F+F-F-F+F");
        assert_eq!(system.evaluated_axiom().len(), 9);
        assert_eq!(system.expand(2).matches('F').count(), 25);
        assert_eq!(system.expand(2).len(), 49);
    }

    #[test]
    fn test_evaluate_matches_repeated_rewrite() {
        let mut system = LSystem::new("0");
        system.add_rule('0', "1[+0]-0");
        system.add_rule('1', "11");
        let mut state = "0".to_string();
        for _ in 0..4 {
            state = system.rewrite(&state);
        }
        system.evaluate(4);
        assert_eq!(system.evaluated_axiom(), state);
    }

    #[test]
    fn test_zero_iterations_and_empty_axiom() {
        let mut system = koch();
        system.evaluate(0);
        assert_eq!(system.evaluated_axiom(), "F");

        let mut empty = LSystem::new("");
        empty.add_rule('F', "FF");
        empty.evaluate(3);
        assert!(empty.is_evaluated());
        assert_eq!(empty.evaluated_axiom(), "");
    }

    #[test]
    fn test_evaluate_is_cached_until_changed() {
        let mut system = koch();
        system.evaluate(1);
        system.evaluate(3);
        assert_eq!(system.evaluated_axiom(), "F+F-F-F+F");

        system.set_axiom("F-F");
        assert!(!system.is_evaluated());
        system.evaluate(1);
        assert_eq!(system.evaluated_axiom(), "F+F-F-F+F-F+F-F-F+F");
    }

    #[test]
    fn test_first_binding_wins() {
        let mut system = koch();
        system.add_rule('F', "FF");
        system.add_symbol('F', Some(TurtleCommand::MoveForward(1.0)));
        system.add_symbol('F', Some(TurtleCommand::MoveForward(2.0)));
        assert_eq!(system.rules()[&'F'], "F+F-F-F+F");
        assert_eq!(
            system.symbols()[&'F'],
            Some(TurtleCommand::MoveForward(1.0))
        );
    }

    #[test]
    fn test_unbound_and_none_symbols_are_skipped() {
        let mut system = LSystem::new("AXB");
        system.add_symbol('A', Some(TurtleCommand::MoveForward(1.0)));
        system.add_symbol('X', None);
        system.add_symbol('B', Some(TurtleCommand::Turn(90)));
        system.evaluate(0);
        let commands: Vec<TurtleCommand> = system.commands().collect();
        assert_eq!(
            commands,
            vec![TurtleCommand::MoveForward(1.0), TurtleCommand::Turn(90)]
        );
    }

    #[test]
    fn test_draw_requires_evaluation() {
        let mut system = koch();
        system.add_symbol('F', Some(TurtleCommand::MoveForward(1.0)));
        let mut canvas = Canvas::new(Bounds2d::default(), 8, 8).unwrap();
        {
            let mut turtle = Turtle::new(Transform2d::default(), &mut canvas);
            system.draw(&mut turtle).unwrap();
            assert_eq!(turtle.command_count(), 0);
        }
        assert!(!canvas.is_allocated());
    }

    #[test]
    fn test_draw_replaces_queue() {
        let mut system = koch();
        system.add_symbol('F', Some(TurtleCommand::MoveForward(2.0)));
        system.add_symbol('+', Some(TurtleCommand::Turn(90)));
        system.add_symbol('-', Some(TurtleCommand::Turn(-90)));
        system.evaluate(1);

        let mut canvas = Canvas::new(Bounds2d::default(), 32, 32).unwrap();
        {
            let mut turtle = Turtle::new(Transform2d::default(), &mut canvas);
            turtle.move_forward(100.0).turn(45);
            system.draw(&mut turtle).unwrap();
            assert_eq!(turtle.command_count(), 9);
            // Koch generation 1 ends heading the same way it started.
            assert_eq!(turtle.heading(), 0);
            assert!((turtle.position().x() - 6.0).abs() < 1e-9);
        }
        assert!(canvas.is_allocated());
        assert!((canvas.bounds().max_y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_many_identity_generations() {
        let mut system = LSystem::new("+-[]");
        system.add_rule('F', "FF");
        system.evaluate(1_000_000);
        assert_eq!(system.evaluated_axiom(), "+-[]");

        let mut empty = LSystem::new("");
        empty.add_rule('A', "AB");
        assert_eq!(empty.expand(u32::MAX), "");
    }
}
