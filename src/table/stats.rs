//! Stats aggregators over the raw, unfiltered collection

use crate::entities::employee::Employee;
use crate::entities::employee::payroll::round_cents;
use crate::entities::order::{Order, OrderStatus};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Order count per known status.
///
/// All four statuses are always present, in workflow order. Orders with an
/// unknown status are not counted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistogram(IndexMap<OrderStatus, usize>);

impl Default for StatusHistogram {
    fn default() -> Self {
        Self(OrderStatus::KNOWN.into_iter().map(|s| (s, 0)).collect())
    }
}

impl StatusHistogram {
    /// Count one order; returns false for a status outside the histogram
    pub fn record(&mut self, status: &OrderStatus) -> bool {
        match self.0.get_mut(status) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, status: &OrderStatus) -> usize {
        self.0.get(status).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OrderStatus, usize)> {
        self.0.iter().map(|(status, count)| (status, *count))
    }

    /// Orders with a known status
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

impl Serialize for StatusHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (status, count) in &self.0 {
            map.serialize_entry(status.label(), count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_amount: f64,
    /// Saturates at `i64::MAX`
    pub total_quantity: i64,
    /// Mean amount; 0 when there are no orders
    pub average_order_value: f64,
    pub status_counts: StatusHistogram,
}

/// Count, sums, mean and status histogram in one pass
pub fn order_stats(orders: &[Order]) -> OrderStats {
    let mut stats = orders
        .iter()
        .fold(OrderStats::default(), |mut stats, order| {
            stats.total_orders += 1;
            stats.total_amount += order.amount;
            stats.total_quantity = stats.total_quantity.saturating_add(order.quantity);
            stats.status_counts.record(&order.status);
            stats
        });

    if stats.total_orders > 0 {
        stats.average_order_value = stats.total_amount / stats.total_orders as f64;
    }
    stats
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    pub headcount: usize,
    pub total_basic_salary: f64,
    pub total_bonus: f64,
    pub total_overtime_payment: f64,
    pub total_epf_etf: f64,
    pub total_net_salary: f64,
    /// Headcount per department, in order of first appearance
    pub departments: IndexMap<String, usize>,
}

pub fn payroll_summary(employees: &[Employee]) -> PayrollSummary {
    let mut summary = PayrollSummary::default();
    for employee in employees {
        let payroll = employee.payroll();
        summary.headcount += 1;
        summary.total_basic_salary += employee.basic_salary;
        summary.total_bonus += employee.bonus;
        summary.total_overtime_payment += payroll.overtime_payment;
        summary.total_epf_etf += payroll.epf_etf;
        summary.total_net_salary += payroll.net_salary;
        *summary
            .departments
            .entry(employee.department.clone())
            .or_insert(0) += 1;
    }

    summary.total_basic_salary = round_cents(summary.total_basic_salary);
    summary.total_bonus = round_cents(summary.total_bonus);
    summary.total_overtime_payment = round_cents(summary.total_overtime_payment);
    summary.total_epf_etf = round_cents(summary.total_epf_etf);
    summary.total_net_salary = round_cents(summary.total_net_salary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(amount: f64, quantity: i64, status: &str) -> Order {
        serde_json::from_value(json!({
            "_id": format!("{}-{}", amount, status),
            "amount": amount,
            "quantity": quantity,
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_collection() {
        let stats = order_stats(&[]);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.average_order_value, 0.0);
        assert_eq!(stats.status_counts.total(), 0);
        assert_eq!(stats.status_counts.iter().count(), 4);
    }

    #[test]
    fn test_totals_and_average() {
        let orders: Vec<Order> = [100.0, 200.0, 300.0, 400.0, 500.0]
            .into_iter()
            .map(|amount| order(amount, 2, "Pending"))
            .collect();
        let stats = order_stats(&orders);
        assert_eq!(stats.total_amount, 1500.0);
        assert_eq!(stats.average_order_value, 300.0);
        assert_eq!(stats.total_quantity, 10);
        assert_eq!(stats.status_counts.get(&OrderStatus::Pending), 5);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let orders = vec![
            order(1.0, 5_000_000_000_000_000_000, "Pending"),
            order(2.0, 5_000_000_000_000_000_000, "Delivered"),
        ];
        let stats = order_stats(&orders);
        assert_eq!(stats.total_quantity, i64::MAX);
        assert_eq!(stats.total_orders, 2);
    }

    #[test]
    fn test_unknown_status_counted_in_total_not_histogram() {
        let orders = vec![
            order(10.0, 1, "Delivered"),
            order(10.0, 1, "delivered"),
            order(10.0, 1, "Lost"),
        ];
        let stats = order_stats(&orders);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.status_counts.total(), 1);
        assert_eq!(stats.status_counts.get(&OrderStatus::Delivered), 1);
    }

    #[test]
    fn test_histogram_serializes_in_fixed_order() {
        let stats = order_stats(&[order(1.0, 1, "Cancelled")]);
        let text = serde_json::to_string(&stats.status_counts).unwrap();
        assert_eq!(
            text,
            r#"{"Pending":0,"On Delivery":0,"Delivered":0,"Cancelled":1}"#
        );
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalOrders"], 1);
        assert!(value.get("averageOrderValue").is_some());
    }

    #[test]
    fn test_payroll_summary() {
        let employees: Vec<Employee> = vec![
            serde_json::from_value(json!({
                "EmployeeName": "A", "DepartmentName": "IT",
                "BasicSalary": 50000, "Bonus": 3000, "OverTimeHours": 10
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "EmployeeName": "B", "DepartmentName": "HR", "BasicSalary": 40000
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "EmployeeName": "C", "DepartmentName": "IT", "BasicSalary": 10000
            }))
            .unwrap(),
        ];
        let summary = payroll_summary(&employees);
        assert_eq!(summary.headcount, 3);
        assert_eq!(summary.total_basic_salary, 100000.0);
        assert_eq!(summary.total_epf_etf, 11000.0);
        assert_eq!(summary.total_overtime_payment, 5000.0);
        assert_eq!(summary.total_net_salary, 97000.0);
        assert_eq!(
            summary.departments.into_iter().collect::<Vec<_>>(),
            vec![("IT".to_string(), 2), ("HR".to_string(), 1)]
        );
    }
}
