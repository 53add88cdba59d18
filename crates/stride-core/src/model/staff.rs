//! Employees and the capabilities attached to them.

use chrono::NaiveDate;
use indexmap::IndexSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  id::{EmployeeId, SupplyId},
  registry::Entity,
  validate,
};

/// A phone number an employee can be reached on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactNumber {
  number: String,
}

impl ContactNumber {
  pub fn new(number: &str) -> Result<Self> {
    Ok(Self { number: validate::non_blank("contact_number", number)? })
  }

  pub fn number(&self) -> &str { &self.number }
}

/// Capability of employees who coordinate incoming supplies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogisticsCoordinator {
  pub(crate) assigned_supplies: IndexSet<SupplyId>,
}

impl LogisticsCoordinator {
  pub fn assigned_supplies(&self) -> impl Iterator<Item = SupplyId> + '_ {
    self.assigned_supplies.iter().copied()
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub(crate) id:           EmployeeId,
  name:                    String,
  surname:                 String,
  position:                String,
  clearance_level:         u8,
  hire_date:               NaiveDate,
  bonus:                   Option<Decimal>,
  contact:                 Option<ContactNumber>,
  pub(crate) logistics:    Option<LogisticsCoordinator>,
  pub(crate) supervisor:   Option<EmployeeId>,
  pub(crate) subordinates: IndexSet<EmployeeId>,
}

/// Input to [`crate::Shop::create_employee`].
#[derive(Debug, Clone)]
pub struct NewEmployee {
  pub name:            String,
  pub surname:         String,
  pub position:        String,
  pub clearance_level: u8,
  pub hire_date:       NaiveDate,
  pub contact:         Option<ContactNumber>,
  /// Attach the logistics-coordinator capability.
  pub coordinator:     bool,
}

impl NewEmployee {
  pub fn new(name: &str, surname: &str, position: &str, hire_date: NaiveDate) -> Self {
    Self {
      name: name.to_owned(),
      surname: surname.to_owned(),
      position: position.to_owned(),
      clearance_level: 1,
      hire_date,
      contact: None,
      coordinator: false,
    }
  }
}

impl Employee {
  pub(crate) fn build(input: NewEmployee, today: NaiveDate) -> Result<Self> {
    validate::not_after("hire_date", input.hire_date, today)?;
    Ok(Self {
      id: EmployeeId::new(),
      name: validate::non_blank("name", &input.name)?,
      surname: validate::non_blank("surname", &input.surname)?,
      position: validate::non_blank("position", &input.position)?,
      clearance_level: validate::in_range("clearance_level", input.clearance_level, 1, 3)?,
      hire_date: input.hire_date,
      bonus: None,
      contact: input.contact,
      logistics: input.coordinator.then(LogisticsCoordinator::default),
      supervisor: None,
      subordinates: IndexSet::new(),
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn surname(&self) -> &str { &self.surname }

  pub fn position(&self) -> &str { &self.position }

  pub fn clearance_level(&self) -> u8 { self.clearance_level }

  pub fn hire_date(&self) -> NaiveDate { self.hire_date }

  pub fn bonus(&self) -> Option<Decimal> { self.bonus }

  pub fn contact(&self) -> Option<&ContactNumber> { self.contact.as_ref() }

  pub fn logistics(&self) -> Option<&LogisticsCoordinator> { self.logistics.as_ref() }

  pub fn supervisor(&self) -> Option<EmployeeId> { self.supervisor }

  pub fn subordinates(&self) -> impl Iterator<Item = EmployeeId> + '_ {
    self.subordinates.iter().copied()
  }

  pub fn has_subordinate(&self, id: EmployeeId) -> bool { self.subordinates.contains(&id) }

  /// Monthly salary: the shop-wide base plus this employee's bonus.
  pub fn salary(&self, base_salary: Decimal) -> Decimal {
    base_salary + self.bonus.unwrap_or(Decimal::ZERO)
  }

  pub fn set_name(&mut self, name: &str) -> Result<()> {
    self.name = validate::non_blank("name", name)?;
    Ok(())
  }

  pub fn set_surname(&mut self, surname: &str) -> Result<()> {
    self.surname = validate::non_blank("surname", surname)?;
    Ok(())
  }

  pub fn set_position(&mut self, position: &str) -> Result<()> {
    self.position = validate::non_blank("position", position)?;
    Ok(())
  }

  pub fn set_clearance_level(&mut self, level: u8) -> Result<()> {
    self.clearance_level = validate::in_range("clearance_level", level, 1, 3)?;
    Ok(())
  }

  pub fn set_bonus(&mut self, bonus: Option<Decimal>) -> Result<()> {
    self.bonus = bonus.map(|b| validate::non_negative("bonus", b)).transpose()?;
    Ok(())
  }

  pub fn set_contact(&mut self, contact: Option<ContactNumber>) { self.contact = contact; }
}

impl Entity for Employee {
  type Id = EmployeeId;

  fn id(&self) -> EmployeeId { self.id }
}
