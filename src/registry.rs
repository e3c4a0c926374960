//! Maps the command ids the activities use to scene constructors.

use crate::scene::{CubeScene, Scene, TriangleScene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Triangle,
    Cube,
}

type Factory = fn() -> Box<dyn Scene>;

fn triangle() -> Box<dyn Scene> {
    Box::new(TriangleScene)
}

fn cube() -> Box<dyn Scene> {
    Box::new(CubeScene::default())
}

const SCENES: &[(&str, SceneKind, Factory)] = &[
    ("triangle", SceneKind::Triangle, triangle),
    ("cube", SceneKind::Cube, cube),
];

impl SceneKind {
    pub fn from_command(command: &str) -> Option<SceneKind> {
        SCENES
            .iter()
            .find(|(id, _, _)| *id == command)
            .map(|(_, kind, _)| *kind)
    }

    pub fn command(self) -> &'static str {
        SCENES
            .iter()
            .find(|(_, kind, _)| *kind == self)
            .map(|(id, _, _)| *id)
            .unwrap_or("unknown")
    }

    pub fn build(self) -> Box<dyn Scene> {
        match SCENES.iter().find(|(_, kind, _)| *kind == self) {
            Some((_, _, factory)) => factory(),
            None => triangle(),
        }
    }

    pub fn all() -> impl Iterator<Item = SceneKind> {
        SCENES.iter().map(|(_, kind, _)| *kind)
    }
}

/// Builds the scene registered under `command`.
pub fn build(command: &str) -> Option<Box<dyn Scene>> {
    SceneKind::from_command(command).map(SceneKind::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_command() {
        for kind in SceneKind::all() {
            assert_eq!(SceneKind::from_command(kind.command()), Some(kind));
            assert_eq!(kind.build().name(), kind.command());
        }
    }

    #[test]
    fn unknown_command_builds_nothing() {
        assert!(build("sphere").is_none());
        assert!(SceneKind::from_command("").is_none());
    }
}
