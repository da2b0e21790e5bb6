/*
[INPUT]:  Loosely typed drag payloads, pointer press/move/release positions, droppable rects
[OUTPUT]: Validated DragEnd events, click-vs-drag decisions, nearest drop target
[POS]:    Drag boundary - everything between raw gestures and the resolver
[UPDATE]: When gesture sources or collision rules change
*/

use serde_json::Value;
use tableside_adapter::OrderId;
use thiserror::Error;

/// Terminal event of one drag gesture, validated at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub active: OrderId,
    /// Column id or order id under the drop point; `None` when dropped outside.
    pub over: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragPayloadError {
    #[error("drag payload has no active id")]
    MissingActive,
    #[error("drag payload field `{field}` has unsupported type")]
    InvalidId { field: &'static str },
}

impl DragEnd {
    pub fn new(active: impl Into<OrderId>, over: Option<String>) -> Self {
        Self {
            active: active.into(),
            over,
        }
    }

    /// Validate a drag-library style payload:
    /// `{"active": {"id": ..}, "over": {"id": ..} | null}`.
    ///
    /// Flat `{"active": "..", "over": ".."}` and numeric ids are accepted as well.
    pub fn try_from_raw(raw: &Value) -> Result<Self, DragPayloadError> {
        let active = extract_id(raw.get("active"), "active")?
            .ok_or(DragPayloadError::MissingActive)?;
        let over = extract_id(raw.get("over"), "over")?;
        Ok(Self {
            active: OrderId::new(active),
            over,
        })
    }
}

fn extract_id(value: Option<&Value>, field: &'static str) -> Result<Option<String>, DragPayloadError> {
    let value = match value {
        Some(Value::Object(map)) => map.get("id"),
        other => other,
    };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) if id.is_empty() => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(_) => Err(DragPayloadError::InvalidId { field }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the same size whose center sits on `center`.
    pub fn centered_on(&self, center: Point) -> Rect {
        Rect::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            Point::new(self.x, self.y),
            Point::new(right, self.y),
            Point::new(self.x, bottom),
            Point::new(right, bottom),
        ]
    }
}

/// A registered drop zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Droppable {
    pub id: String,
    pub rect: Rect,
}

/// Nearest droppable by summed corner-to-corner distance.
///
/// Ties go to the droppable registered first.
pub fn closest_corners<'a>(dragged: &Rect, droppables: &'a [Droppable]) -> Option<&'a Droppable> {
    let corners = dragged.corners();
    let mut best: Option<(&Droppable, f32)> = None;
    for droppable in droppables {
        let score: f32 = corners
            .iter()
            .zip(droppable.rect.corners().iter())
            .map(|(a, b)| a.distance(b))
            .sum();
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((droppable, score)),
        }
    }
    best.map(|(droppable, _)| droppable)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// Pointer crossed the activation distance; a drag is in progress.
    DragStart { active: OrderId },
    /// Released before activation.
    Click { active: OrderId },
    DragEnd(DragEnd),
}

#[derive(Debug, Clone, PartialEq)]
enum SensorState {
    Idle,
    Pressed { active: OrderId, origin: Point },
    Dragging { active: OrderId },
}

/// Pointer sensor with a minimum-distance activation constraint.
#[derive(Debug, Clone)]
pub struct PointerSensor {
    activation_distance: f32,
    state: SensorState,
}

impl PointerSensor {
    pub fn new(activation_distance: f32) -> Self {
        Self {
            activation_distance: activation_distance.max(0.0),
            state: SensorState::Idle,
        }
    }

    pub fn activation_distance(&self) -> f32 {
        self.activation_distance
    }

    /// Order currently being dragged, once activated.
    pub fn dragging(&self) -> Option<&OrderId> {
        match &self.state {
            SensorState::Dragging { active } => Some(active),
            _ => None,
        }
    }

    pub fn press(&mut self, active: OrderId, at: Point) {
        self.state = SensorState::Pressed { active, origin: at };
    }

    pub fn moved(&mut self, at: Point) -> Option<SensorEvent> {
        let SensorState::Pressed { active, origin } = &self.state else {
            return None;
        };
        if origin.distance(&at) < self.activation_distance {
            return None;
        }
        let active = active.clone();
        self.state = SensorState::Dragging {
            active: active.clone(),
        };
        Some(SensorEvent::DragStart { active })
    }

    pub fn release(&mut self, over: Option<String>) -> Option<SensorEvent> {
        match std::mem::replace(&mut self.state, SensorState::Idle) {
            SensorState::Idle => None,
            SensorState::Pressed { active, .. } => Some(SensorEvent::Click { active }),
            SensorState::Dragging { active } => Some(SensorEvent::DragEnd(DragEnd { active, over })),
        }
    }

    /// Abort the gesture; an active drag ends outside every target.
    pub fn cancel(&mut self) -> Option<SensorEvent> {
        match std::mem::replace(&mut self.state, SensorState::Idle) {
            SensorState::Dragging { active } => {
                Some(SensorEvent::DragEnd(DragEnd { active, over: None }))
            }
            _ => None,
        }
    }
}
