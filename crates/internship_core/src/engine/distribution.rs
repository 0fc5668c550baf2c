//! Balanced student-to-faculty distribution.
//!
//! # Responsibility
//! - Partition students across faculty so per-faculty counts differ by at
//!   most one.
//! - Group by department for global runs; report departments with no
//!   faculty instead of failing.
//!
//! # Invariants
//! - Output is a pure function of the inputs and the policy.
//! - Each faculty receives `base` or `base + 1` students where
//!   `base = n / k`; exactly `n % k` faculty receive `base + 1`.
//! - Students are consumed in order, in contiguous blocks per faculty.
//! - Every input student appears in at most one pairing.

use crate::model::assignment::Pairing;
use crate::model::person::{Faculty, Student};
use std::collections::BTreeMap;

/// Which faculty receive the `base + 1` share when `n % k != 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraShare {
    /// First `n % k` faculty in list order.
    Leading,
    /// Last `n % k` faculty in list order.
    Trailing,
}

/// How students are ordered before being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentOrder {
    /// Sort by department, then roll number, then id.
    ByRollNumber,
    /// Keep the caller's order.
    AsGiven,
}

/// How faculty are ordered before shares are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacultyOrder {
    /// Sort by id.
    ById,
    /// Keep the caller's order.
    AsGiven,
}

/// Distribution conventions applied by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionPolicy {
    pub extra_share: ExtraShare,
    pub student_order: StudentOrder,
    pub faculty_order: FacultyOrder,
}

impl DistributionPolicy {
    /// Convention of the all-departments run.
    pub const GLOBAL: Self = Self {
        extra_share: ExtraShare::Leading,
        student_order: StudentOrder::ByRollNumber,
        faculty_order: FacultyOrder::ById,
    };

    /// Convention of the coordinator-triggered single-department run.
    pub const DEPARTMENT_SCOPED: Self = Self {
        extra_share: ExtraShare::Trailing,
        student_order: StudentOrder::AsGiven,
        faculty_order: FacultyOrder::AsGiven,
    };
}

/// Share arithmetic applied to one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentAllocation {
    pub department: Option<String>,
    pub student_count: usize,
    pub faculty_count: usize,
    pub base: usize,
    pub extra: usize,
}

/// Department whose students could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDepartment {
    pub department: Option<String>,
    pub student_count: usize,
}

/// Result of a grouped distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionPlan {
    /// Pairings in department order, then faculty order.
    pub pairs: Vec<Pairing>,
    pub allocations: Vec<DepartmentAllocation>,
    /// Departments with students but no faculty.
    pub skipped: Vec<SkippedDepartment>,
}

impl DistributionPlan {
    pub fn assigned_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn unplaced_count(&self) -> usize {
        self.skipped.iter().map(|gap| gap.student_count).sum()
    }
}

/// Returns the number of students each faculty position receives.
///
/// Returns an empty vector when `faculty_count == 0`.
pub fn share_sizes(
    student_count: usize,
    faculty_count: usize,
    extra_share: ExtraShare,
) -> Vec<usize> {
    if faculty_count == 0 {
        return Vec::new();
    }

    let base = student_count / faculty_count;
    let extra = student_count % faculty_count;
    (0..faculty_count)
        .map(|index| {
            let gets_extra = match extra_share {
                ExtraShare::Leading => index < extra,
                ExtraShare::Trailing => index >= faculty_count - extra,
            };
            if gets_extra {
                base + 1
            } else {
                base
            }
        })
        .collect()
}

/// Distributes one department's students across that department's faculty.
///
/// No department grouping happens here; callers pass pre-filtered inputs.
/// Returns no pairings when `faculty` is empty.
pub fn distribute_department(
    students: &[Student],
    faculty: &[Faculty],
    policy: DistributionPolicy,
) -> Vec<Pairing> {
    let students: Vec<&Student> = students.iter().collect();
    let faculty: Vec<&Faculty> = faculty.iter().collect();
    distribute_refs(students, faculty, policy)
}

/// Distributes students across faculty department by department.
///
/// Departments are visited in ascending order (`None` first). A department
/// with students and no faculty is recorded in `skipped` and produces no
/// pairings.
pub fn distribute(
    students: &[Student],
    faculty: &[Faculty],
    policy: DistributionPolicy,
) -> DistributionPlan {
    let mut students_by_department: BTreeMap<Option<&str>, Vec<&Student>> = BTreeMap::new();
    for student in students {
        students_by_department
            .entry(student.department.as_deref())
            .or_default()
            .push(student);
    }

    let mut faculty_by_department: BTreeMap<Option<&str>, Vec<&Faculty>> = BTreeMap::new();
    for member in faculty {
        faculty_by_department
            .entry(member.department.as_deref())
            .or_default()
            .push(member);
    }

    let mut plan = DistributionPlan::default();
    for (department, department_students) in students_by_department {
        let department_faculty = faculty_by_department.remove(&department).unwrap_or_default();
        let student_count = department_students.len();
        let faculty_count = department_faculty.len();

        if faculty_count == 0 {
            plan.skipped.push(SkippedDepartment {
                department: department.map(str::to_string),
                student_count,
            });
            continue;
        }

        plan.allocations.push(DepartmentAllocation {
            department: department.map(str::to_string),
            student_count,
            faculty_count,
            base: student_count / faculty_count,
            extra: student_count % faculty_count,
        });
        plan.pairs
            .extend(distribute_refs(department_students, department_faculty, policy));
    }

    plan
}

fn distribute_refs(
    mut students: Vec<&Student>,
    mut faculty: Vec<&Faculty>,
    policy: DistributionPolicy,
) -> Vec<Pairing> {
    if faculty.is_empty() || students.is_empty() {
        return Vec::new();
    }

    if policy.student_order == StudentOrder::ByRollNumber {
        students.sort_by(|left, right| {
            left.department
                .cmp(&right.department)
                .then_with(|| left.roll_number.cmp(&right.roll_number))
                .then_with(|| left.id.cmp(&right.id))
        });
    }
    if policy.faculty_order == FacultyOrder::ById {
        faculty.sort_by(|left, right| left.id.cmp(&right.id));
    }

    let shares = share_sizes(students.len(), faculty.len(), policy.extra_share);
    let mut remaining = students.into_iter();
    let mut pairs = Vec::with_capacity(remaining.len());
    for (member, share) in faculty.into_iter().zip(shares) {
        for student in remaining.by_ref().take(share) {
            pairs.push(Pairing::new(student.id.as_str(), member.id.as_str()));
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::{
        distribute, distribute_department, share_sizes, DistributionPolicy, ExtraShare,
    };
    use crate::model::assignment::Pairing;
    use crate::model::person::{Faculty, Student};
    use std::collections::HashMap;

    fn students(department: &str, count: usize) -> Vec<Student> {
        (1..=count)
            .map(|index| {
                Student::new(format!("S{index}"), Some(department), format!("R{index:03}"))
            })
            .collect()
    }

    fn faculty(department: &str, ids: &[&str]) -> Vec<Faculty> {
        ids.iter().map(|id| Faculty::new(*id, Some(department))).collect()
    }

    fn students_of(pairs: &[Pairing], faculty_id: &str) -> Vec<String> {
        pairs
            .iter()
            .filter(|pair| pair.faculty_id == faculty_id)
            .map(|pair| pair.student_id.clone())
            .collect()
    }

    #[test]
    fn leading_share_goes_to_first_faculty() {
        assert_eq!(share_sizes(7, 3, ExtraShare::Leading), vec![3, 2, 2]);
        assert_eq!(share_sizes(8, 3, ExtraShare::Leading), vec![3, 3, 2]);
    }

    #[test]
    fn trailing_share_goes_to_last_faculty() {
        assert_eq!(share_sizes(7, 3, ExtraShare::Trailing), vec![2, 2, 3]);
        assert_eq!(share_sizes(8, 3, ExtraShare::Trailing), vec![2, 3, 3]);
    }

    #[test]
    fn share_sizes_with_no_faculty_is_empty() {
        assert!(share_sizes(5, 0, ExtraShare::Leading).is_empty());
    }

    #[test]
    fn fewer_students_than_faculty_gives_one_each_to_leading_faculty() {
        assert_eq!(share_sizes(2, 4, ExtraShare::Leading), vec![1, 1, 0, 0]);
        assert_eq!(share_sizes(2, 4, ExtraShare::Trailing), vec![0, 0, 1, 1]);
    }

    #[test]
    fn share_sizes_are_balanced_and_conserve_students() {
        for faculty_count in 1..=9 {
            for student_count in 0..=40 {
                for extra_share in [ExtraShare::Leading, ExtraShare::Trailing] {
                    let shares = share_sizes(student_count, faculty_count, extra_share);
                    let base = student_count / faculty_count;
                    assert_eq!(shares.iter().sum::<usize>(), student_count);
                    assert!(shares.iter().all(|share| *share == base || *share == base + 1));
                    assert_eq!(
                        shares.iter().filter(|share| **share == base + 1).count(),
                        student_count % faculty_count
                    );
                }
            }
        }
    }

    #[test]
    fn cs_scenario_assigns_contiguous_blocks_by_roll_number() {
        let mut input = students("CS", 7);
        input.reverse();
        let plan = distribute(
            &input,
            &faculty("CS", &["F1", "F2", "F3"]),
            DistributionPolicy::GLOBAL,
        );

        assert_eq!(plan.assigned_count(), 7);
        assert_eq!(students_of(&plan.pairs, "F1"), vec!["S1", "S2", "S3"]);
        assert_eq!(students_of(&plan.pairs, "F2"), vec!["S4", "S5"]);
        assert_eq!(students_of(&plan.pairs, "F3"), vec!["S6", "S7"]);
        assert_eq!(plan.allocations[0].base, 2);
        assert_eq!(plan.allocations[0].extra, 1);
    }

    #[test]
    fn global_policy_sorts_faculty_by_id() {
        let plan = distribute(
            &students("CS", 3),
            &faculty("CS", &["F2", "F1"]),
            DistributionPolicy::GLOBAL,
        );
        assert_eq!(students_of(&plan.pairs, "F1"), vec!["S1", "S2"]);
        assert_eq!(students_of(&plan.pairs, "F2"), vec!["S3"]);
    }

    #[test]
    fn roll_number_ties_break_by_id() {
        let input = vec![
            Student::new("b", Some("CS"), "R1"),
            Student::new("a", Some("CS"), "R1"),
        ];
        let plan = distribute(&input, &faculty("CS", &["F1", "F2"]), DistributionPolicy::GLOBAL);
        assert_eq!(students_of(&plan.pairs, "F1"), vec!["a"]);
        assert_eq!(students_of(&plan.pairs, "F2"), vec!["b"]);
    }

    #[test]
    fn department_without_faculty_is_skipped_and_others_proceed() {
        let mut input = students("ME", 3);
        input.push(Student::new("C1", Some("CS"), "001"));
        let mut members = faculty("CS", &["F1"]);
        members.extend(faculty("EE", &["F9"]));

        let plan = distribute(&input, &members, DistributionPolicy::GLOBAL);

        assert_eq!(plan.pairs, vec![Pairing::new("C1", "F1")]);
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].department.as_deref(), Some("ME"));
        assert_eq!(plan.unplaced_count(), 3);
        assert!(plan
            .allocations
            .iter()
            .all(|allocation| allocation.department.as_deref() != Some("EE")));
    }

    #[test]
    fn missing_department_only_matches_faculty_without_department() {
        let input = vec![Student::new("S1", None, "001")];
        let plan = distribute(&input, &faculty("CS", &["F1"]), DistributionPolicy::GLOBAL);
        assert!(plan.pairs.is_empty());
        assert_eq!(plan.skipped[0].department, None);

        let plan = distribute(&input, &[Faculty::new("F0", None)], DistributionPolicy::GLOBAL);
        assert_eq!(plan.pairs, vec![Pairing::new("S1", "F0")]);
    }

    #[test]
    fn department_scoped_policy_keeps_input_order_and_favors_last_faculty() {
        let mut input = students("CS", 7);
        input.reverse();
        let pairs = distribute_department(
            &input,
            &faculty("CS", &["F3", "F1", "F2"]),
            DistributionPolicy::DEPARTMENT_SCOPED,
        );

        assert_eq!(students_of(&pairs, "F3"), vec!["S7", "S6"]);
        assert_eq!(students_of(&pairs, "F1"), vec!["S5", "S4"]);
        assert_eq!(students_of(&pairs, "F2"), vec!["S3", "S2", "S1"]);
    }

    #[test]
    fn balance_holds_for_every_department() {
        let mut input = students("CS", 11);
        input.extend(
            (1..=5).map(|index| Student::new(format!("E{index}"), Some("EE"), format!("{index}"))),
        );
        let mut members = faculty("CS", &["F1", "F2", "F3", "F4"]);
        members.extend(faculty("EE", &["G1", "G2"]));

        let plan = distribute(&input, &members, DistributionPolicy::GLOBAL);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for pair in &plan.pairs {
            *counts.entry(pair.faculty_id.as_str()).or_default() += 1;
        }

        assert_eq!(plan.assigned_count(), 16);
        assert_eq!(
            ["F1", "F2", "F3", "F4"].map(|id| counts[id]),
            [3, 3, 3, 2]
        );
        assert_eq!(["G1", "G2"].map(|id| counts[id]), [3, 2]);
    }

    #[test]
    fn empty_inputs_produce_empty_plan() {
        let plan = distribute(&[], &faculty("CS", &["F1"]), DistributionPolicy::GLOBAL);
        assert!(plan.pairs.is_empty());
        assert!(plan.allocations.is_empty());
        assert!(plan.skipped.is_empty());
        assert!(
            distribute_department(&students("CS", 2), &[], DistributionPolicy::DEPARTMENT_SCOPED)
                .is_empty()
        );
    }
}
