//=========================================================================
// Feedback Adapters
//=========================================================================
//
// Pools specialised for short-lived audiovisual feedback.
//
// Components:
// - `audio`: one-shot sound effects on reusable emitters
// - `vfx`: particle bursts despawned on a timer
//
// Both pair a `ResourcePool` with a `ReleaseScheduler` and are driven
// by calling `update(dt)` once per frame.
//
//=========================================================================

pub mod audio;
pub mod vfx;
