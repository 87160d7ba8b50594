//! Order status and waste type enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

const KNOWN_LABELS: [&str; 4] = ["Pending", "On Delivery", "Delivered", "Cancelled"];

/// Delivery status of an order.
///
/// Statuses received from elsewhere that are not one of the four known
/// labels are kept verbatim in [`OrderStatus::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    OnDelivery,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// The known statuses, in histogram order
    pub const KNOWN: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::OnDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::OnDelivery => "On Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Other(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Lenient match used when sanitizing form input ("on delivery" → "On Delivery")
    pub fn canonical_label(raw: &str) -> Option<&'static str> {
        let wanted = raw.trim();
        KNOWN_LABELS
            .into_iter()
            .find(|label| label.eq_ignore_ascii_case(wanted))
    }

    /// Labels of the known statuses
    pub fn known_labels() -> Vec<String> {
        KNOWN_LABELS.iter().map(|label| label.to_string()).collect()
    }

    /// Whether the delivery workflow allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            OrderStatus::Pending => {
                matches!(next, OrderStatus::OnDelivery | OrderStatus::Cancelled)
            }
            OrderStatus::OnDelivery => {
                matches!(next, OrderStatus::Delivered | OrderStatus::Cancelled)
            }
            OrderStatus::Delivered | OrderStatus::Cancelled => false,
            OrderStatus::Other(_) => next.is_known(),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Pending" => OrderStatus::Pending,
            "On Delivery" => OrderStatus::OnDelivery,
            "Delivered" => OrderStatus::Delivered,
            "Cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        OrderStatus::from(raw.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How status changes on update are policed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any known status may follow any other
    #[default]
    Unconstrained,
    /// Pending → On Delivery → Delivered, with Cancelled reachable until delivery
    Workflow,
}

impl StatusPolicy {
    pub fn allows(&self, from: &OrderStatus, to: &OrderStatus) -> bool {
        match self {
            StatusPolicy::Unconstrained => true,
            StatusPolicy::Workflow => from.can_transition_to(to),
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unconstrained" => Some(StatusPolicy::Unconstrained),
            "workflow" => Some(StatusPolicy::Workflow),
            _ => None,
        }
    }
}

/// Kinds of coconut waste an order can be for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteType {
    CoconutHusk,
    CoconutShell,
    CoconutFiber,
    CoconutPith,
    CoconutLeaves,
    CoconutTrunk,
}

impl WasteType {
    pub const ALL: [WasteType; 6] = [
        WasteType::CoconutHusk,
        WasteType::CoconutShell,
        WasteType::CoconutFiber,
        WasteType::CoconutPith,
        WasteType::CoconutLeaves,
        WasteType::CoconutTrunk,
    ];

    /// Wire value, e.g. `CoconutHusk`
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::CoconutHusk => "CoconutHusk",
            WasteType::CoconutShell => "CoconutShell",
            WasteType::CoconutFiber => "CoconutFiber",
            WasteType::CoconutPith => "CoconutPith",
            WasteType::CoconutLeaves => "CoconutLeaves",
            WasteType::CoconutTrunk => "CoconutTrunk",
        }
    }

    /// Label for pickers, e.g. `Coconut Husk`
    pub fn display_name(&self) -> &'static str {
        match self {
            WasteType::CoconutHusk => "Coconut Husk",
            WasteType::CoconutShell => "Coconut Shell",
            WasteType::CoconutFiber => "Coconut Fiber",
            WasteType::CoconutPith => "Coconut Pith",
            WasteType::CoconutLeaves => "Coconut Leaves",
            WasteType::CoconutTrunk => "Coconut Trunk",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == raw)
    }

    pub fn wire_values() -> Vec<String> {
        Self::ALL.iter().map(|w| w.as_str().to_string()).collect()
    }
}
