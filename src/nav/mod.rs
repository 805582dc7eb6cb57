// Navigation core - the focus state machine
//
// selection: per-view selected-index controller with explicit edge signaling
// dispatch: pure key -> intent translation for each interactive surface
//
// The layered walk over surfaces (modal first, then the active view, then
// globals) lives in tui::run_tui's key routing; these modules hold the parts
// that are pure state and therefore unit-testable without a terminal.

pub mod dispatch;
pub mod selection;
