//! Synthetic school used by the demo data source.
//!
//! Generated once from a seed. Every payload the provider hands out is a view over this
//! one dataset, so counters always agree with the lists they summarize.

use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::dto::{
    AccountStatus, ActivityEntry, AdminSummary, Announcement, ChildRecord, Course, EventItem,
    FacultySummary, GradeRecord, Role, UserProfile, UserRecord,
};
use shared::utils::letter_grade;

pub const ADMIN_COUNT: usize = 8;
pub const FACULTY_COUNT: usize = 23;
pub const STUDENT_COUNT: usize = 125;
pub const COURSE_COUNT: usize = 42;

const DEPARTMENTS: [&str; 6] = [
    "Mathematics",
    "Sciences",
    "Humanities",
    "Languages",
    "Arts",
    "Computing",
];

const FIRST_NAMES: [&str; 16] = [
    "Amara", "Ben", "Chloe", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonah",
    "Kavya", "Liam", "Maya", "Noah", "Olu", "Priya",
];

const LAST_NAMES: [&str; 12] = [
    "Adeyemi", "Bauer", "Castillo", "Dubois", "Evans", "Fischer", "Gupta", "Hansen", "Ito",
    "Jensen", "Kowalski", "Larsen",
];

const ASSESSMENTS: [&str; 2] = ["Midterm", "Project"];

/// The whole synthetic school.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub admins: Vec<UserRecord>,
    pub faculty: Vec<UserRecord>,
    pub students: Vec<UserRecord>,
    pub courses: Vec<Course>,
    pub active_sessions: u32,
    pub activity: Vec<ActivityEntry>,
    pub faculty_schedule: Vec<EventItem>,
    pub pending_grading: u32,
    pub average_attendance: f64,
    /// Enrolment of the signed-in student (indices into `courses`)
    pub student_courses: Vec<usize>,
    pub student_grades: Vec<GradeRecord>,
    pub children: Vec<ChildRecord>,
    pub child_grades: Vec<GradeRecord>,
    pub parent_events: Vec<EventItem>,
    pub announcements: Vec<Announcement>,
}

fn person_name(index: usize) -> String {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index * 7 + index / FIRST_NAMES.len()) % LAST_NAMES.len()];
    format!("{} {}", first, last)
}

fn user(index: usize, prefix: &str, role: Role, rng: &mut StdRng) -> UserRecord {
    let name = person_name(index);
    let email = format!(
        "{}.{}@school.example",
        name.to_lowercase().replace(' ', "."),
        index
    );
    let status = if rng.random_bool(0.04) {
        AccountStatus::Pending
    } else if rng.random_bool(0.02) {
        AccountStatus::Suspended
    } else {
        AccountStatus::Active
    };
    UserRecord {
        id: format!("{}-{:03}", prefix, index + 1),
        name,
        email,
        role,
        status,
    }
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn grades_for(
    student: &UserRecord,
    course_indices: &[usize],
    courses: &[Course],
    rng: &mut StdRng,
) -> Vec<GradeRecord> {
    course_indices
        .iter()
        .flat_map(|&ci| ASSESSMENTS.iter().map(move |a| (ci, *a)))
        .map(|(ci, assessment)| {
            let score = round1(rng.random_range(58.0..100.0));
            GradeRecord {
                student_id: student.id.clone(),
                student_name: student.name.clone(),
                course_code: courses[ci].code.clone(),
                assessment: assessment.to_string(),
                score,
                max_score: 100.0,
                letter: letter_grade(score).to_string(),
            }
        })
        .collect()
}

impl DemoDataset {
    /// Build the dataset. Same seed, same school.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let today = Local::now().date_naive();
        let day = |offset: i64| iso(today + ChronoDuration::days(offset));

        let admins: Vec<UserRecord> = (0..ADMIN_COUNT)
            .map(|i| user(i, "adm", Role::Admin, &mut rng))
            .collect();
        let faculty: Vec<UserRecord> = (0..FACULTY_COUNT)
            .map(|i| user(ADMIN_COUNT + i, "fac", Role::Faculty, &mut rng))
            .collect();
        let students: Vec<UserRecord> = (0..STUDENT_COUNT)
            .map(|i| user(ADMIN_COUNT + FACULTY_COUNT + i, "stu", Role::Student, &mut rng))
            .collect();

        // Round-robin instructors so every faculty member teaches at least one course
        let courses: Vec<Course> = (0..COURSE_COUNT)
            .map(|i| {
                let department = DEPARTMENTS[i % DEPARTMENTS.len()];
                let capacity = rng.random_range(24..=40);
                Course {
                    id: format!("crs-{:03}", i + 1),
                    code: format!("{}{}", &department[..3].to_uppercase(), 100 + i),
                    title: format!("{} {}", department, ["Foundations", "Methods", "Seminar"][i % 3]),
                    instructor: faculty[i % FACULTY_COUNT].name.clone(),
                    enrolled: rng.random_range(8..=capacity),
                    capacity,
                    credits: [3, 4, 2][i % 3],
                }
            })
            .collect();

        let activity = (0..10)
            .map(|i| {
                let actor = &admins[i % ADMIN_COUNT];
                let action = ["approved enrolment", "reset password", "created course", "updated timetable"][i % 4];
                ActivityEntry {
                    id: format!("act-{:03}", i + 1),
                    actor: actor.name.clone(),
                    action: action.to_string(),
                    at: (Local::now() - ChronoDuration::minutes(17 * i as i64)).to_rfc3339(),
                }
            })
            .collect();

        let faculty_schedule = ["Department meeting", "Office hours", "Curriculum review", "Parent conferences", "Exam board"]
            .iter()
            .enumerate()
            .map(|(i, title)| EventItem {
                id: format!("fev-{:03}", i + 1),
                title: title.to_string(),
                category: "schedule".to_string(),
                date: day(i as i64 * 2),
                description: None,
            })
            .collect();

        let student_courses: Vec<usize> = (0..5).map(|i| (i * 7) % COURSE_COUNT).collect();
        let student_grades = grades_for(&students[0], &student_courses, &courses, &mut rng);

        // The parent's first child is the signed-in student, so both dashboards agree
        let second_child_courses: Vec<usize> = (0..4).map(|i| (i * 5 + 3) % COURSE_COUNT).collect();
        let mut child_grades = student_grades.clone();
        child_grades.extend(grades_for(&students[1], &second_child_courses, &courses, &mut rng));

        let children = students[..2]
            .iter()
            .enumerate()
            .map(|(i, s)| ChildRecord {
                id: s.id.clone(),
                name: s.name.clone(),
                grade_level: 9 + i as u8 * 2,
                homeroom: format!("Room {}", 101 + i * 12),
                attendance_rate: round1(rng.random_range(88.0..99.5)),
            })
            .collect();

        let parent_events = [
            ("Parent-teacher evening", "meeting"),
            ("Science fair", "event"),
            ("Term report release", "academic"),
            ("Sports day", "event"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (title, category))| EventItem {
            id: format!("pev-{:03}", i + 1),
            title: title.to_string(),
            category: category.to_string(),
            date: day(3 + i as i64 * 6),
            description: Some(format!("{} for all families", title)),
        })
        .collect();

        let announcements = (0..5)
            .map(|i| {
                let course = &courses[student_courses[i % student_courses.len()]];
                Announcement {
                    id: format!("ann-{:03}", i + 1),
                    title: format!("{} update", course.code),
                    body: format!("Please review the week {} materials for {}.", i + 1, course.title),
                    posted_by: course.instructor.clone(),
                    posted_on: day(-(i as i64)),
                    course_code: Some(course.code.clone()),
                }
            })
            .collect();

        Self {
            admins,
            faculty,
            students,
            courses,
            active_sessions: rng.random_range(5..=40),
            activity,
            faculty_schedule,
            pending_grading: rng.random_range(0..=15),
            average_attendance: round1(rng.random_range(85.0..98.0)),
            student_courses,
            student_grades,
            children,
            child_grades,
            parent_events,
            announcements,
        }
    }

    pub fn user_directory(&self) -> Vec<UserRecord> {
        self.admins
            .iter()
            .chain(&self.faculty)
            .chain(&self.students)
            .cloned()
            .collect()
    }

    pub fn admin_summary(&self) -> AdminSummary {
        AdminSummary {
            users: (self.admins.len() + self.faculty.len() + self.students.len()) as u32,
            faculty: self.faculty.len() as u32,
            students: self.students.len() as u32,
            admins: self.admins.len() as u32,
            courses: self.courses.len() as u32,
            departments: DEPARTMENTS.len() as u32,
            active_sessions: self.active_sessions,
        }
    }

    fn profile(record: &UserRecord, department: Option<&str>) -> UserProfile {
        UserProfile {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role,
            department: department.map(str::to_string),
        }
    }

    pub fn admin_profile(&self) -> UserProfile {
        Self::profile(&self.admins[0], Some("Administration"))
    }

    pub fn faculty_profile(&self) -> UserProfile {
        Self::profile(&self.faculty[0], Some(DEPARTMENTS[0]))
    }

    pub fn student_profile(&self) -> UserProfile {
        Self::profile(&self.students[0], None)
    }

    /// Courses taught by the signed-in faculty member
    pub fn taught_courses(&self) -> Vec<Course> {
        let name = &self.faculty[0].name;
        self.courses
            .iter()
            .filter(|c| &c.instructor == name)
            .cloned()
            .collect()
    }

    pub fn faculty_summary(&self) -> FacultySummary {
        let taught = self.taught_courses();
        FacultySummary {
            courses: taught.len() as u32,
            students: taught.iter().map(|c| c.enrolled).sum(),
            pending_grading: self.pending_grading,
            average_attendance: self.average_attendance,
        }
    }

    pub fn enrolled_courses(&self) -> Vec<Course> {
        self.student_courses
            .iter()
            .map(|&i| self.courses[i].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_school() {
        let a = DemoDataset::generate(11);
        let b = DemoDataset::generate(11);
        assert_eq!(a.courses, b.courses);
        assert_eq!(a.student_grades, b.student_grades);
        assert_eq!(a.active_sessions, b.active_sessions);
    }

    #[test]
    fn test_summary_matches_directory() {
        let ds = DemoDataset::generate(1);
        let summary = ds.admin_summary();
        assert_eq!(summary.users, 156);
        assert_eq!(summary.faculty, 23);
        assert_eq!(summary.students, 125);
        assert_eq!(summary.users as usize, ds.user_directory().len());
        assert_eq!(summary.courses as usize, ds.courses.len());
    }

    #[test]
    fn test_faculty_summary_matches_taught_courses() {
        let ds = DemoDataset::generate(3);
        let taught = ds.taught_courses();
        let summary = ds.faculty_summary();
        assert!(!taught.is_empty());
        assert_eq!(summary.courses as usize, taught.len());
        assert_eq!(summary.students, taught.iter().map(|c| c.enrolled).sum::<u32>());
        assert!(taught.iter().all(|c| c.enrolled <= c.capacity));
    }

    #[test]
    fn test_parent_first_child_is_signed_in_student() {
        let ds = DemoDataset::generate(5);
        assert_eq!(ds.children[0].id, ds.student_profile().id);
        let first_child: Vec<_> = ds
            .child_grades
            .iter()
            .filter(|g| g.student_id == ds.children[0].id)
            .cloned()
            .collect();
        assert_eq!(first_child, ds.student_grades);
    }

    #[test]
    fn test_grade_letters_agree_with_scores() {
        let ds = DemoDataset::generate(9);
        for grade in ds.child_grades {
            assert_eq!(grade.letter, letter_grade(grade.score));
            assert!(grade.score <= grade.max_score);
        }
    }
}
