use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InputError;

pub type TableId = u64;
pub type ZoneId = u64;

/// Default "standard" table footprint in feet.
pub const DEFAULT_TABLE_WIDTH_FT: f64 = 8.0;
pub const DEFAULT_TABLE_HEIGHT_FT: f64 = 3.0;

/// Nominal venue size used when an event has no explicit dimensions.
pub const DEFAULT_VENUE_WIDTH_FT: f64 = 100.0;
pub const DEFAULT_VENUE_HEIGHT_FT: f64 = 100.0;

/// A 2-D point. Venue-space points are in feet, screen-space points in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned rectangle, always normalized so `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Build from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Rect {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> Self {
        Rect::from_corners(origin, origin.offset(width, height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Inclusive overlap test: rectangles that share an edge overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Booked,
    Paid,
    Reserved,
    Occupied,
}

impl TableStatus {
    pub const ALL: [TableStatus; 5] = [
        TableStatus::Available,
        TableStatus::Booked,
        TableStatus::Paid,
        TableStatus::Reserved,
        TableStatus::Occupied,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Booked => "booked",
            TableStatus::Paid => "paid",
            TableStatus::Reserved => "reserved",
            TableStatus::Occupied => "occupied",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown table status: {s}"))
    }
}

/// Cosmetic orientation. Rotating swaps a table's width and height; the angle
/// only tells the renderer which way the label reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InputError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(InputError::InvalidRotation(other)),
        }
    }
}

/// Stored angles are read leniently: any multiple of 90 (negative or past a
/// full turn) folds onto a quarter turn and anything else reads as upright.
impl From<f64> for Rotation {
    fn from(degrees: f64) -> Self {
        let folded = if degrees.is_finite() {
            (degrees.round() as i64).rem_euclid(360)
        } else {
            0
        };
        u16::try_from(folded)
            .ok()
            .and_then(|d| Rotation::try_from(d).ok())
            .unwrap_or_default()
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> u16 {
        r.degrees()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    /// Top-left corner of the bounding rect, in feet.
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_table_width")]
    pub width: f64,
    #[serde(default = "default_table_height")]
    pub height: f64,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub zone_id: Option<ZoneId>,
    /// Derived by the auto-labeling engine.
    #[serde(default)]
    pub label: String,
}

fn default_table_width() -> f64 {
    DEFAULT_TABLE_WIDTH_FT
}

fn default_table_height() -> f64 {
    DEFAULT_TABLE_HEIGHT_FT
}

impl Table {
    pub fn new(id: TableId, position: Point) -> Self {
        Table {
            id,
            x: position.x,
            y: position.y,
            width: DEFAULT_TABLE_WIDTH_FT,
            height: DEFAULT_TABLE_HEIGHT_FT,
            rotation: Rotation::Deg0,
            status: TableStatus::Available,
            vendor_id: None,
            zone_id: None,
            label: String::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    /// Swap the footprint and advance the cosmetic angle by 90 degrees.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.rotation = self.rotation.next();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default = "default_zone_color")]
    pub color: String,
    #[serde(default)]
    pub price: f64,
}

fn default_zone_color() -> String {
    "#8b5cf6".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default = "default_venue_width")]
    pub width: f64,
    #[serde(default = "default_venue_height")]
    pub height: f64,
    /// Explicit polygon in feet. Fewer than three points means "use the
    /// nominal width x height rectangle".
    #[serde(default, deserialize_with = "lenient_list")]
    pub boundary: Vec<Point>,
}

fn default_venue_width() -> f64 {
    DEFAULT_VENUE_WIDTH_FT
}

fn default_venue_height() -> f64 {
    DEFAULT_VENUE_HEIGHT_FT
}

impl Default for Venue {
    fn default() -> Self {
        Venue {
            width: DEFAULT_VENUE_WIDTH_FT,
            height: DEFAULT_VENUE_HEIGHT_FT,
            boundary: Vec::new(),
        }
    }
}

impl Venue {
    pub fn new(width: f64, height: f64) -> Self {
        Venue {
            width,
            height,
            boundary: Vec::new(),
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ]
    }

    pub fn has_boundary(&self) -> bool {
        self.boundary.len() >= 3
    }

    /// The polygon the room is bounded by: the explicit boundary when set,
    /// the nominal rectangle otherwise.
    pub fn outline(&self) -> Vec<Point> {
        if self.has_boundary() {
            self.boundary.clone()
        } else {
            Venue::rectangle(self.width, self.height)
        }
    }

    pub fn bounds(&self) -> Rect {
        if self.has_boundary() {
            crate::calc::polygon_bounds(&self.boundary)
                .unwrap_or_else(|| Rect::from_origin_size(Point::ORIGIN, self.width, self.height))
        } else {
            Rect::from_origin_size(Point::ORIGIN, self.width, self.height)
        }
    }
}

/// The venue/table/zone aggregate for one event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub venue: Venue,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tables: Vec<Table>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub zones: Vec<Zone>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a stored list without failing the whole plan: `null` or a non-list
/// reads as empty and entries that do not parse are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            tracing::warn!(found = %other, "expected a list, reading as empty");
            return Ok(Vec::new());
        }
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed entry");
                None
            }
        })
        .collect())
}

impl FloorPlan {
    pub fn new(event_id: impl Into<String>, name: impl Into<String>, venue: Venue) -> Self {
        FloorPlan {
            event_id: event_id.into(),
            name: name.into(),
            venue,
            tables: Vec::new(),
            zones: Vec::new(),
        }
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn table_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == id)
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id == id)
    }

    pub fn next_table_id(&self) -> TableId {
        self.tables.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
    }

    pub fn next_zone_id(&self) -> ZoneId {
        self.zones.iter().map(|z| z.id).max().map_or(1, |max| max + 1)
    }

    /// Bounding box of every table, or `None` for an empty room.
    pub fn tables_bounds(&self) -> Option<Rect> {
        self.tables
            .iter()
            .map(Table::rect)
            .reduce(|acc, r| acc.union(&r))
    }

    /// Remove every table whose id is in `ids`. Returns how many were removed.
    pub fn remove_tables(&mut self, ids: &[TableId]) -> usize {
        let before = self.tables.len();
        self.tables.retain(|t| !ids.contains(&t.id));
        before - self.tables.len()
    }

    /// Delete a zone and null out every table reference to it. Returns the
    /// number of tables that lost their zone, or `None` if the zone is unknown.
    pub fn delete_zone(&mut self, id: ZoneId) -> Option<usize> {
        let idx = self.zones.iter().position(|z| z.id == id)?;
        self.zones.remove(idx);
        let mut cleared = 0;
        for table in self.tables.iter_mut().filter(|t| t.zone_id == Some(id)) {
            table.zone_id = None;
            cleared += 1;
        }
        Some(cleared)
    }
}

/// Parse an operator-entered dimension in feet. Anything that is not a
/// positive finite number is rejected.
pub fn parse_dimension(raw: &str) -> Result<f64, InputError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::NotANumber(raw.trim().to_string()))?;
    validate_dimension(value)
}

pub fn validate_dimension(value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NonPositive(value))
    }
}

/// Generate a fresh event id.
#[cfg(feature = "uuid-support")]
pub fn new_event_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
