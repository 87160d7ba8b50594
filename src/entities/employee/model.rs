//! Employee entity model

use super::payroll::Payroll;
use crate::core::field::{FieldValue, null_as_default};
use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A staff member on the payroll.
///
/// Wire names are PascalCase. Salary figures derived from the stored ones
/// live in [`Payroll`] and are attached on output by [`EmployeeView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "EmployeeName", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Business key, unique across employees
    #[serde(rename = "EmployeeId", default, deserialize_with = "null_as_default")]
    pub employee_id: String,
    #[serde(rename = "DepartmentName", default, deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(rename = "JobRole", default, deserialize_with = "null_as_default")]
    pub job_role: String,
    #[serde(rename = "PhoneNumber", default, deserialize_with = "string_or_number")]
    pub phone_number: String,
    #[serde(rename = "Email", default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "BasicSalary", default, deserialize_with = "null_as_default")]
    pub basic_salary: f64,
    #[serde(rename = "Bonus", default, deserialize_with = "null_as_default")]
    pub bonus: f64,
    #[serde(rename = "OverTimeHours", default, deserialize_with = "null_as_default")]
    pub overtime_hours: f64,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Phone numbers arrive as text or, from some clients, as a bare number
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(u64),
        Float(f64),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => format!("{}", f),
        Raw::Null(()) => String::new(),
    })
}

/// Body of `POST /employees`, after sanitizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    #[serde(rename = "EmployeeName")]
    pub name: String,
    #[serde(rename = "EmployeeId")]
    pub employee_id: String,
    #[serde(rename = "DepartmentName")]
    pub department: String,
    #[serde(rename = "JobRole")]
    pub job_role: String,
    #[serde(rename = "PhoneNumber", deserialize_with = "string_or_number")]
    pub phone_number: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "BasicSalary")]
    pub basic_salary: f64,
    #[serde(rename = "Bonus", default)]
    pub bonus: Option<f64>,
    #[serde(rename = "OverTimeHours", default)]
    pub overtime_hours: Option<f64>,
}

/// Body of `PUT /employees/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(rename = "EmployeeName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "EmployeeId", default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(rename = "DepartmentName", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(rename = "JobRole", default, skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(rename = "PhoneNumber", default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "BasicSalary", default, skip_serializing_if = "Option::is_none")]
    pub basic_salary: Option<f64>,
    #[serde(rename = "Bonus", default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(rename = "OverTimeHours", default, skip_serializing_if = "Option::is_none")]
    pub overtime_hours: Option<f64>,
}

/// An employee as served: stored fields plus the derived payroll figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    #[serde(flatten)]
    pub payroll: Payroll,
}

impl From<Employee> for EmployeeView {
    fn from(employee: Employee) -> Self {
        let payroll = employee.payroll();
        Self { employee, payroll }
    }
}

impl Employee {
    pub fn from_new(new: NewEmployee, now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            name: new.name,
            employee_id: new.employee_id,
            department: new.department,
            job_role: new.job_role,
            phone_number: new.phone_number,
            email: new.email,
            basic_salary: new.basic_salary,
            bonus: new.bonus.unwrap_or_default(),
            overtime_hours: new.overtime_hours.unwrap_or_default(),
            created_at: Some(now),
        }
    }

    pub fn payroll(&self) -> Payroll {
        Payroll::compute(self.basic_salary, self.overtime_hours, self.bonus)
    }

    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(employee_id) = patch.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(department) = patch.department {
            self.department = department;
        }
        if let Some(job_role) = patch.job_role {
            self.job_role = job_role;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(basic_salary) = patch.basic_salary {
            self.basic_salary = basic_salary;
        }
        if let Some(bonus) = patch.bonus {
            self.bonus = bonus;
        }
        if let Some(overtime_hours) = patch.overtime_hours {
            self.overtime_hours = overtime_hours;
        }
    }
}

impl Record for Employee {
    fn resource_name() -> &'static str {
        "employees"
    }

    fn resource_name_singular() -> &'static str {
        "employee"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["EmployeeName", "EmployeeId", "DepartmentName"]
    }

    fn unique_fields() -> &'static [&'static str] {
        &["EmployeeId"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "_id" | "id" => FieldValue::String(self.id.clone()),
            "EmployeeName" => FieldValue::String(self.name.clone()),
            "EmployeeId" => FieldValue::String(self.employee_id.clone()),
            "DepartmentName" => FieldValue::String(self.department.clone()),
            "JobRole" => FieldValue::String(self.job_role.clone()),
            "PhoneNumber" => FieldValue::String(self.phone_number.clone()),
            "Email" => FieldValue::String(self.email.clone()),
            "BasicSalary" => FieldValue::Float(self.basic_salary),
            "Bonus" => FieldValue::Float(self.bonus),
            "OverTimeHours" => FieldValue::Float(self.overtime_hours),
            "OverTimePayment" => FieldValue::Float(self.payroll().overtime_payment),
            "EPF_ETF" => FieldValue::Float(self.payroll().epf_etf),
            "NetSalary" => FieldValue::Float(self.payroll().net_salary),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "_id": "e1",
            "EmployeeName": "John Doe",
            "EmployeeId": "EMP001",
            "DepartmentName": "IT",
            "JobRole": "Developer",
            "PhoneNumber": 1234567890u64,
            "Email": "john@example.com",
            "BasicSalary": 50000,
            "Bonus": 3000,
            "OverTimeHours": 10,
            "NetSalary": 1
        })
    }

    #[test]
    fn test_numeric_phone_number_accepted() {
        let employee: Employee = serde_json::from_value(payload()).unwrap();
        assert_eq!(employee.phone_number, "1234567890");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let mut raw = payload();
        raw["Bonus"] = json!(null);
        raw["JobRole"] = json!(null);
        raw["PhoneNumber"] = json!(null);
        let employee: Employee = serde_json::from_value(raw).unwrap();
        assert_eq!(employee.bonus, 0.0);
        assert_eq!(employee.job_role, "");
        assert_eq!(employee.phone_number, "");
        assert_eq!(employee.payroll().net_salary, 49500.0);
    }

    #[test]
    fn test_derived_fields_ignored_on_input_and_recomputed_on_output() {
        let employee: Employee = serde_json::from_value(payload()).unwrap();
        let value = serde_json::to_value(EmployeeView::from(employee)).unwrap();
        assert_eq!(value["NetSalary"], 52500.0);
        assert_eq!(value["EPF_ETF"], 5500.0);
        assert_eq!(value["OverTimePayment"], 5000.0);
        assert_eq!(value["EmployeeName"], "John Doe");
        assert_eq!(value["_id"], "e1");
    }

    #[test]
    fn test_view_reads_back_as_employee() {
        let employee: Employee = serde_json::from_value(payload()).unwrap();
        let value = serde_json::to_value(EmployeeView::from(employee.clone())).unwrap();
        let back: Employee = serde_json::from_value(value).unwrap();
        assert_eq!(back, employee);
    }

    #[test]
    fn test_apply_patch() {
        let mut employee: Employee = serde_json::from_value(payload()).unwrap();
        employee.apply(EmployeePatch {
            bonus: Some(0.0),
            department: Some("Finance".into()),
            ..EmployeePatch::default()
        });
        assert_eq!(employee.department, "Finance");
        assert_eq!(employee.payroll().net_salary, 49500.0);
    }

    #[test]
    fn test_search_covers_name_id_and_department() {
        let employee: Employee = serde_json::from_value(payload()).unwrap();
        assert!(employee.matches_search("john"));
        assert!(employee.matches_search("emp0"));
        assert!(employee.matches_search("it"));
        assert!(!employee.matches_search("developer"));
    }
}
