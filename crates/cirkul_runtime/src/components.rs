// components.rs - Demo component types

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Position(pub Vec2);

/// Units per second.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Velocity(pub Vec2);

/// Packed 0xRRGGBBAA.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Tint(pub u32);

cirkul_core::components! { Position, Velocity, Tint }
