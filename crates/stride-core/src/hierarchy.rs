//! Employee supervision: a reflexive, single-parent association.
//!
//! The graph must stay a forest. Every mutation that could break that is
//! checked by walking the supervisor chain before anything is written.

use std::collections::HashSet;

use crate::{
  Error, Result, Violation,
  id::EmployeeId,
  model::Employee,
  registry::Registry,
};

/// Outcome of [`assign_supervisor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
  Unchanged,
  Assigned { previous: Option<EmployeeId> },
}

/// Walks from an employee's supervisor upwards. Stops early if the chain
/// revisits a node, which only happens if the forest is already broken.
pub struct Ancestors<'a> {
  employees: &'a Registry<Employee>,
  next:      Option<EmployeeId>,
  seen:      HashSet<EmployeeId>,
}

impl Iterator for Ancestors<'_> {
  type Item = EmployeeId;

  fn next(&mut self) -> Option<EmployeeId> {
    let current = self.next?;
    if !self.seen.insert(current) {
      self.next = None;
      return None;
    }
    self.next = self.employees.get(current).and_then(Employee::supervisor);
    Some(current)
  }
}

/// Supervisors of `employee`, nearest first.
pub fn ancestors(employees: &Registry<Employee>, employee: EmployeeId) -> Ancestors<'_> {
  Ancestors {
    employees,
    next: employees.get(employee).and_then(Employee::supervisor),
    seen: HashSet::new(),
  }
}

/// Make `supervisor` the supervisor of `employee`.
pub fn assign_supervisor(
  employees: &mut Registry<Employee>,
  employee: EmployeeId,
  supervisor: EmployeeId,
) -> Result<Assignment> {
  let current = employees.require(employee)?.supervisor;
  employees.require(supervisor)?;

  if employee == supervisor {
    return Err(Violation::SelfSupervision.into());
  }
  if current == Some(supervisor) {
    return Ok(Assignment::Unchanged);
  }
  // The new supervisor, or anyone above it, must not be `employee`.
  let closes_cycle = std::iter::once(supervisor)
    .chain(ancestors(employees, supervisor))
    .any(|id| id == employee);
  if closes_cycle {
    return Err(Violation::SupervisionCycle { employee, supervisor }.into());
  }

  if let Some(previous) = current
    && let Some(prev) = employees.get_mut(previous)
  {
    prev.subordinates.shift_remove(&employee);
  }
  if let Some(e) = employees.get_mut(employee) {
    e.supervisor = Some(supervisor);
  }
  if let Some(s) = employees.get_mut(supervisor) {
    s.subordinates.insert(employee);
  }

  tracing::debug!(%employee, %supervisor, "supervisor assigned");
  Ok(Assignment::Assigned { previous: current })
}

/// Clear `employee`'s supervisor. Returns the former supervisor, if any.
pub fn remove_supervisor(
  employees: &mut Registry<Employee>,
  employee: EmployeeId,
) -> Result<Option<EmployeeId>> {
  let e = employees.require_mut(employee)?;
  let Some(previous) = e.supervisor.take() else {
    return Ok(None);
  };
  if let Some(prev) = employees.get_mut(previous) {
    prev.subordinates.shift_remove(&employee);
  }
  tracing::debug!(%employee, supervisor = %previous, "supervisor removed");
  Ok(Some(previous))
}

/// Detach `subordinate` from `supervisor`. Rejected unless `subordinate`
/// currently reports to `supervisor`.
pub fn remove_subordinate(
  employees: &mut Registry<Employee>,
  supervisor: EmployeeId,
  subordinate: EmployeeId,
) -> Result<()> {
  let reports_here = employees.require(supervisor)?.has_subordinate(subordinate)
    && employees.require(subordinate)?.supervisor == Some(supervisor);
  if !reports_here {
    return Err(Error::not_associated(supervisor, subordinate));
  }
  remove_supervisor(employees, subordinate)?;
  Ok(())
}

/// Cut every supervision edge touching `employee`. Its subordinates become
/// roots of their own trees.
pub(crate) fn detach_all(employees: &mut Registry<Employee>, employee: EmployeeId) -> Result<()> {
  remove_supervisor(employees, employee)?;
  let subordinates = match employees.get_mut(employee) {
    Some(e) => std::mem::take(&mut e.subordinates),
    None => return Ok(()),
  };
  for sub in subordinates {
    if let Some(s) = employees.get_mut(sub) {
      s.supervisor = None;
    }
  }
  Ok(())
}

/// Verify the forest invariants by walking every parent chain.
pub fn verify_forest(employees: &Registry<Employee>, problems: &mut Vec<String>) {
  let limit = employees.len();
  for e in employees.all() {
    let id = e.id;

    let mut steps = 0;
    let mut cursor = e.supervisor;
    while let Some(s) = cursor {
      if s == id {
        problems.push(format!("employee {id} is its own ancestor"));
        break;
      }
      steps += 1;
      if steps > limit {
        problems.push(format!("supervisor chain above {id} does not terminate"));
        break;
      }
      cursor = employees.get(s).and_then(Employee::supervisor);
    }

    if let Some(s) = e.supervisor {
      match employees.get(s) {
        None => problems.push(format!("employee {id} reports to missing {s}")),
        Some(sup) if !sup.has_subordinate(id) => {
          problems.push(format!("employee {s} does not list subordinate {id}"))
        }
        Some(_) => {}
      }
    }

    for sub in e.subordinates() {
      let agrees = employees
        .get(sub)
        .is_some_and(|s| s.supervisor == Some(id));
      if !agrees {
        problems.push(format!("employee {id} lists {sub} which reports elsewhere"));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::model::NewEmployee;

  fn hire(employees: &mut Registry<Employee>, name: &str) -> EmployeeId {
    let day = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let e = Employee::build(NewEmployee::new(name, "Doe", "Clerk", day), day).unwrap();
    let id = e.id;
    employees.add(e);
    id
  }

  fn forest_ok(employees: &Registry<Employee>) {
    let mut problems = Vec::new();
    verify_forest(employees, &mut problems);
    assert!(problems.is_empty(), "{problems:?}");
  }

  #[test]
  fn self_supervision_is_rejected() {
    let mut employees = Registry::new();
    let a = hire(&mut employees, "A");

    let err = assign_supervisor(&mut employees, a, a).unwrap_err();

    assert_eq!(err.violation(), Some(&Violation::SelfSupervision));
    assert_eq!(employees.get(a).unwrap().supervisor(), None);
  }

  #[test]
  fn deep_cycle_is_rejected_without_side_effects() {
    let mut employees = Registry::new();
    let a = hire(&mut employees, "A");
    let b = hire(&mut employees, "B");
    let c = hire(&mut employees, "C");
    assign_supervisor(&mut employees, b, a).unwrap();
    assign_supervisor(&mut employees, c, b).unwrap();

    let err = assign_supervisor(&mut employees, a, c).unwrap_err();

    assert!(matches!(err.violation(), Some(Violation::SupervisionCycle { .. })));
    assert_eq!(employees.get(a).unwrap().supervisor(), None);
    assert_eq!(employees.get(c).unwrap().subordinates().count(), 0);
    forest_ok(&employees);
  }

  #[test]
  fn reassignment_moves_the_subordinate() {
    let mut employees = Registry::new();
    let a = hire(&mut employees, "A");
    let b = hire(&mut employees, "B");
    let e = hire(&mut employees, "E");

    assign_supervisor(&mut employees, e, a).unwrap();
    let outcome = assign_supervisor(&mut employees, e, b).unwrap();

    assert_eq!(outcome, Assignment::Assigned { previous: Some(a) });
    assert!(!employees.get(a).unwrap().has_subordinate(e));
    assert!(employees.get(b).unwrap().has_subordinate(e));
    assert_eq!(assign_supervisor(&mut employees, e, b).unwrap(), Assignment::Unchanged);
    forest_ok(&employees);
  }

  #[test]
  fn remove_subordinate_requires_the_edge() {
    let mut employees = Registry::new();
    let a = hire(&mut employees, "A");
    let b = hire(&mut employees, "B");
    let c = hire(&mut employees, "C");
    assign_supervisor(&mut employees, b, a).unwrap();

    let err = remove_subordinate(&mut employees, c, b).unwrap_err();
    assert!(matches!(err, Error::NotAssociated { .. }));

    remove_subordinate(&mut employees, a, b).unwrap();
    assert_eq!(employees.get(b).unwrap().supervisor(), None);
    assert!(!employees.get(a).unwrap().has_subordinate(b));
  }

  #[test]
  fn ancestors_walks_to_the_root() {
    let mut employees = Registry::new();
    let a = hire(&mut employees, "A");
    let b = hire(&mut employees, "B");
    let c = hire(&mut employees, "C");
    assign_supervisor(&mut employees, b, a).unwrap();
    assign_supervisor(&mut employees, c, b).unwrap();

    assert_eq!(ancestors(&employees, c).collect::<Vec<_>>(), vec![b, a]);
    assert_eq!(remove_supervisor(&mut employees, a).unwrap(), None);
  }
}
