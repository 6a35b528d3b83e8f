//! Replays keyboard input from a text script
//!
//! One tick per line, comma-separated key names. A key that was not held on
//! the previous line counts as just pressed. Blank lines are idle ticks,
//! lines starting with `#` are skipped and `wait N` repeats the previous
//! line's held keys for N ticks.

use std::fs;
use std::io;
use std::path::Path;

use super::input::{InputSource, Key, TickInput};

pub struct ScriptedInput {
    ticks: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn parse(script: &str) -> Self {
        let mut ticks: Vec<TickInput> = Vec::new();
        let mut held: Vec<Key> = Vec::new();

        for line in script.lines() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let line = line.split('#').next().unwrap_or("").trim();

            if let Some(count) = line.strip_prefix("wait ") {
                let Ok(count) = count.trim().parse::<usize>() else {
                    log::warn!("Bad wait count in script: {}", line);
                    continue;
                };
                for _ in 0..count {
                    ticks.push(TickInput::hold(&held));
                }
                continue;
            }

            let mut pressed = Vec::new();
            for name in line.split(',').filter(|n| !n.trim().is_empty()) {
                match Key::from_name(name) {
                    Some(key) if !pressed.contains(&key) => pressed.push(key),
                    Some(_) => {}
                    None => log::warn!("Unknown key in script: {}", name.trim()),
                }
            }
            let just_pressed = pressed
                .iter()
                .copied()
                .filter(|k| !held.contains(k))
                .collect();
            ticks.push(TickInput {
                pressed: pressed.clone(),
                just_pressed,
            });
            held = pressed;
        }

        Self { ticks, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.ticks.len()
    }
}

impl InputSource for ScriptedInput {
    /// Idle input once the script runs out
    fn poll(&mut self) -> TickInput {
        let input = self.ticks.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edges_and_holds() {
        let mut script = ScriptedInput::parse("space\n\nright\nright,down\n# comment\nwait 2\n");
        assert_eq!(script.len(), 6);

        assert_eq!(script.poll(), TickInput::tap(&[Key::Space]));
        assert!(script.poll().is_empty());
        assert_eq!(script.poll(), TickInput::tap(&[Key::Right]));

        let both = script.poll();
        assert_eq!(both.pressed, vec![Key::Right, Key::Down]);
        assert_eq!(both.just_pressed, vec![Key::Down]);

        // Comment lines are not ticks; the waits keep both keys held
        for _ in 0..2 {
            assert_eq!(script.poll(), TickInput::hold(&[Key::Right, Key::Down]));
        }
        assert!(script.is_finished());
    }

    #[test]
    fn test_wait_repeats_held_keys() {
        let mut script = ScriptedInput::parse("left\nwait 3\n");
        assert_eq!(script.len(), 4);
        script.poll();
        for _ in 0..3 {
            assert_eq!(script.poll(), TickInput::hold(&[Key::Left]));
        }
        assert!(script.is_finished());
        assert!(script.poll().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let mut script = ScriptedInput::parse("up, jump");
        assert_eq!(script.poll(), TickInput::tap(&[Key::Up]));
    }
}
