/// Scene element ids and colours used by the browser adapter.
pub const LINE_ELEMENT_ID: &str = "line";
pub const ERROR_ELEMENT_ID: &str = "error";
pub const RESET_BUTTON_ID: &str = "reset";

/// Colour of every extruded piece.
pub const PIECE_COLOR: &str = "#156289";
/// Colour of slot markers without a highlight.
pub const SLOT_COLOR: &str = "#EF2D5E";
/// Highlights for the first slots so a player can orient the board.
pub const SLOT_HIGHLIGHTS: [&str; 5] = ["#00FF00", "#0000FF", "#FFFF00", "#FFA500", "#800080"];

/// `line` component value that hides the selection line.
pub const LINE_HIDDEN: &str = "start: 0 0 0; end: 0 0 0";
