//! Motion domain: keyboard sampling into the input snapshot.

use bevy::prelude::*;

use crate::motion::InputSnapshot;

const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputSnapshot>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        x += 1.0;
    }

    // Vertical axis (dash aim)
    let mut y = 0.0;
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        y += 1.0;
    }

    input.movement = Vec2::new(x, y);
    input.jump_held = keyboard.any_pressed(JUMP_KEYS);
    input.run_held = keyboard.pressed(KeyCode::ShiftLeft);

    // Edges latch until the logic phase consumes them.
    input.jump_pressed |= keyboard.any_just_pressed(JUMP_KEYS);
    input.jump_released |= keyboard.any_just_released(JUMP_KEYS);
    input.dash_pressed |= keyboard.just_pressed(KeyCode::KeyJ);
}
