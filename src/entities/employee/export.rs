//! CSV export of an employee table

use super::model::Employee;
use serde::Serialize;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Employee ID")]
    employee_id: &'a str,
    #[serde(rename = "Department")]
    department: &'a str,
    #[serde(rename = "Job Role")]
    job_role: &'a str,
    #[serde(rename = "Phone Number")]
    phone_number: &'a str,
    #[serde(rename = "Email")]
    email: &'a str,
    #[serde(rename = "Basic Salary")]
    basic_salary: String,
    #[serde(rename = "Bonus")]
    bonus: String,
    #[serde(rename = "Overtime Hours")]
    overtime_hours: String,
    #[serde(rename = "Overtime Payment")]
    overtime_payment: String,
    #[serde(rename = "EPF/ETF")]
    epf_etf: String,
    #[serde(rename = "Net Salary")]
    net_salary: String,
}

impl<'a> From<&'a Employee> for CsvRow<'a> {
    fn from(employee: &'a Employee) -> Self {
        let payroll = employee.payroll();
        Self {
            name: &employee.name,
            employee_id: &employee.employee_id,
            department: &employee.department,
            job_role: &employee.job_role,
            phone_number: &employee.phone_number,
            email: &employee.email,
            basic_salary: money(employee.basic_salary),
            bonus: money(employee.bonus),
            overtime_hours: format!("{}", employee.overtime_hours),
            overtime_payment: money(payroll.overtime_payment),
            epf_etf: money(payroll.epf_etf),
            net_salary: money(payroll.net_salary),
        }
    }
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// One header row then one row per employee, in the given order, with the
/// derived payroll columns recomputed
pub fn employees_to_csv(employees: &[Employee]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if employees.is_empty() {
        writer.write_record(HEADERS)?;
    }
    for employee in employees {
        writer.serialize(CsvRow::from(employee))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

const HEADERS: [&str; 12] = [
    "Name",
    "Employee ID",
    "Department",
    "Job Role",
    "Phone Number",
    "Email",
    "Basic Salary",
    "Bonus",
    "Overtime Hours",
    "Overtime Payment",
    "EPF/ETF",
    "Net Salary",
];
