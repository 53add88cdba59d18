//! Employees, supervision and coordinator assignments.

use rust_decimal::Decimal;

use crate::{
  Error, Result, Violation,
  hierarchy::{self, Assignment},
  id::{EmployeeId, SupplyId},
  model::{Employee, NewEmployee},
};

use super::Shop;

impl Shop {
  /// Hire an employee. The hire date may not lie in the future.
  pub fn create_employee(&mut self, input: NewEmployee) -> Result<EmployeeId> {
    let employee = Employee::build(input, self.clock.today())?;
    let id = employee.id;
    self.employees.add(employee);
    tracing::debug!(employee = %id, "employee hired");
    Ok(id)
  }

  pub fn assign_supervisor(
    &mut self,
    employee: EmployeeId,
    supervisor: EmployeeId,
  ) -> Result<Assignment> {
    hierarchy::assign_supervisor(&mut self.employees, employee, supervisor)
      .inspect_err(|err| tracing::debug!(%employee, %supervisor, %err, "supervision rejected"))
  }

  pub fn remove_supervisor(&mut self, employee: EmployeeId) -> Result<Option<EmployeeId>> {
    hierarchy::remove_supervisor(&mut self.employees, employee)
  }

  pub fn remove_subordinate(
    &mut self,
    supervisor: EmployeeId,
    subordinate: EmployeeId,
  ) -> Result<()> {
    hierarchy::remove_subordinate(&mut self.employees, supervisor, subordinate)
  }

  /// Supervisors above `employee`, nearest first.
  pub fn chain_of_command(&self, employee: EmployeeId) -> Result<Vec<EmployeeId>> {
    self.employees.require(employee)?;
    Ok(hierarchy::ancestors(&self.employees, employee).collect())
  }

  /// Base salary from the shop settings plus the employee's bonus.
  pub fn salary(&self, employee: EmployeeId) -> Result<Decimal> {
    Ok(self.employees.require(employee)?.salary(self.settings.base_salary))
  }

  // ── Logistics ─────────────────────────────────────────────────────────

  /// Put a supply in a logistics coordinator's care. Returns `false` if it
  /// was already assigned to them.
  pub fn assign_supply(&mut self, employee: EmployeeId, supply: SupplyId) -> Result<bool> {
    self.supplies.require(supply)?;
    let Some(coordinator) = self.employees.require_mut(employee)?.logistics.as_mut() else {
      return Err(Violation::NotCoordinator(employee).into());
    };
    Ok(coordinator.assigned_supplies.insert(supply))
  }

  pub fn unassign_supply(&mut self, employee: EmployeeId, supply: SupplyId) -> Result<()> {
    let removed = self
      .employees
      .require_mut(employee)?
      .logistics
      .as_mut()
      .is_some_and(|c| c.assigned_supplies.shift_remove(&supply));
    if !removed {
      return Err(Error::not_associated(employee, supply));
    }
    Ok(())
  }
}
