use serde::{Deserialize, Serialize};

/// Shape of one piece border.
///
/// `Tab` bulges away from the piece, `Socket` dents into it. The numeric
/// values are the wire representation handed to the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EdgeShape {
    #[default]
    Flat = 0,
    Tab = 1,
    Socket = 2,
}

impl EdgeShape {
    /// Shape the facing neighbour must carry for a proper interlock.
    pub fn complement(self) -> EdgeShape {
        match self {
            EdgeShape::Flat => EdgeShape::Flat,
            EdgeShape::Tab => EdgeShape::Socket,
            EdgeShape::Socket => EdgeShape::Tab,
        }
    }

    pub fn is_flat(self) -> bool {
        self == EdgeShape::Flat
    }
}

impl From<EdgeShape> for u8 {
    fn from(e: EdgeShape) -> u8 {
        e as u8
    }
}

impl TryFrom<u8> for EdgeShape {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(EdgeShape::Flat),
            1 => Ok(EdgeShape::Tab),
            2 => Ok(EdgeShape::Socket),
            other => Err(format!("invalid edge shape {other}")),
        }
    }
}

/// Whether edge `a` may sit against edge `b`.
///
/// Deliberately permissive: only a socket facing a socket or a flat edge is
/// refused. Tab/Tab and Flat/Tab pass.
pub fn fits(a: EdgeShape, b: EdgeShape) -> bool {
    use EdgeShape::*;
    !matches!((a, b), (Socket, Socket) | (Socket, Flat) | (Flat, Socket))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

/// The four borders of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeSet {
    pub top: EdgeShape,
    pub right: EdgeShape,
    pub bottom: EdgeShape,
    pub left: EdgeShape,
}

impl EdgeSet {
    pub fn new(top: EdgeShape, right: EdgeShape, bottom: EdgeShape, left: EdgeShape) -> Self {
        EdgeSet {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn get(&self, side: Side) -> EdgeShape {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Edges after `quarter_turns` counter-clockwise turns about the depth axis.
    /// One turn brings the right edge to the top.
    pub fn rotated(&self, quarter_turns: u8) -> EdgeSet {
        let mut e = *self;
        for _ in 0..quarter_turns % 4 {
            e = EdgeSet {
                top: e.right,
                right: e.bottom,
                bottom: e.left,
                left: e.top,
            };
        }
        e
    }
}
