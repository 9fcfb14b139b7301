//! Database seeder for Acadia development and testing.
//!
//! Seeds test users (admin, teacher, students), subjects, and a handful of
//! published grades for local development and testing purposes.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::str::FromStr;
use uuid::Uuid;

use acadia_db::entities::{
    grades,
    sea_orm_active_enums::{AssessmentKind, InstitutionType, UserRole},
    subjects, users,
};

/// Test admin ID (consistent for all seeds)
const TEST_ADMIN_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Test teacher ID (consistent for all seeds)
const TEST_TEACHER_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Test school student ID (consistent for all seeds)
const TEST_SCHOOL_STUDENT_ID: &str = "00000000-0000-0000-0000-000000000003";
/// Test college student ID (consistent for all seeds)
const TEST_COLLEGE_STUDENT_ID: &str = "00000000-0000-0000-0000-000000000004";
/// Test mathematics subject ID
const TEST_MATH_SUBJECT_ID: &str = "00000000-0000-0000-0000-000000000101";
/// Test computer science subject ID
const TEST_CS_SUBJECT_ID: &str = "00000000-0000-0000-0000-000000000102";

/// Placeholder hash for the dev password; real hashes are produced at register time.
const DEV_PASSWORD_HASH: &str = "$argon2id$v=19$m=65536,t=3,p=4$dev_hash";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = acadia_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test users...");
    seed_test_users(&db).await;

    println!("Seeding subjects...");
    seed_subjects(&db).await;

    println!("Seeding grades...");
    seed_grades(&db).await;

    println!("Seeding complete!");
}

fn id(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap()
}

/// Seeds an admin, a teacher, and one student per institution type.
async fn seed_test_users(db: &DatabaseConnection) {
    let users = [
        (
            TEST_ADMIN_ID,
            "Test Admin",
            "admin@acadia.dev",
            UserRole::Admin,
            InstitutionType::School,
            None,
            None,
        ),
        (
            TEST_TEACHER_ID,
            "Test Teacher",
            "teacher@acadia.dev",
            UserRole::Teacher,
            InstitutionType::School,
            None,
            None,
        ),
        (
            TEST_SCHOOL_STUDENT_ID,
            "School Student",
            "school.student@acadia.dev",
            UserRole::Student,
            InstitutionType::School,
            Some(10),
            None,
        ),
        (
            TEST_COLLEGE_STUDENT_ID,
            "College Student",
            "college.student@acadia.dev",
            UserRole::Student,
            InstitutionType::College,
            None,
            Some("Computer Science"),
        ),
    ];

    for (raw_id, full_name, email, role, institution_type, class_level, department) in users {
        if users::Entity::find_by_id(id(raw_id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  User {email} already exists, skipping...");
            continue;
        }

        let user = users::ActiveModel {
            id: Set(id(raw_id)),
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(DEV_PASSWORD_HASH.to_string()),
            role: Set(role),
            institution_type: Set(institution_type),
            class_level: Set(class_level),
            department: Set(department.map(String::from)),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = user.insert(db).await {
            eprintln!("Failed to insert user {email}: {e}");
        } else {
            println!("  Created user: {email}");
        }
    }
}

/// Seeds one school subject and one college subject.
async fn seed_subjects(db: &DatabaseConnection) {
    let subjects = [
        (
            TEST_MATH_SUBJECT_ID,
            "Mathematics",
            "MATH-10",
            "Class 10 mathematics",
            4,
            InstitutionType::School,
            Some(10),
            None,
        ),
        (
            TEST_CS_SUBJECT_ID,
            "Data Structures",
            "CS-201",
            "Second-year data structures",
            3,
            InstitutionType::College,
            None,
            Some("Computer Science"),
        ),
    ];

    for (raw_id, name, code, description, credits, institution_type, class_level, department) in
        subjects
    {
        if subjects::Entity::find_by_id(id(raw_id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Subject {code} already exists, skipping...");
            continue;
        }

        let subject = subjects::ActiveModel {
            id: Set(id(raw_id)),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            description: Set(Some(description.to_string())),
            credits: Set(credits),
            institution_type: Set(institution_type),
            class_level: Set(class_level),
            department: Set(department.map(String::from)),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = subject.insert(db).await {
            eprintln!("Failed to insert subject {code}: {e}");
        } else {
            println!("  Created subject: {code}");
        }
    }
}

/// Seeds a few published grades for the test students.
///
/// Derived columns are written with values the grade calculator would
/// produce for the same marks.
async fn seed_grades(db: &DatabaseConnection) {
    if grades::Entity::find()
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Grades already exist, skipping...");
        return;
    }

    let grades = [
        (
            TEST_SCHOOL_STUDENT_ID,
            TEST_MATH_SUBJECT_ID,
            "Midterm Test",
            AssessmentKind::Test,
            "92",
            "100",
            "92.0000",
            "A+",
            None,
            Some("Term 1"),
        ),
        (
            TEST_SCHOOL_STUDENT_ID,
            TEST_MATH_SUBJECT_ID,
            "Algebra Assignment",
            AssessmentKind::Assignment,
            "17",
            "20",
            "85.0000",
            "A",
            None,
            Some("Term 1"),
        ),
        (
            TEST_COLLEGE_STUDENT_ID,
            TEST_CS_SUBJECT_ID,
            "Semester Exam",
            AssessmentKind::Exam,
            "66",
            "100",
            "66.0000",
            "C",
            Some("Semester 3"),
            None,
        ),
    ];

    for (
        student_id,
        subject_id,
        assessment_name,
        assessment_kind,
        marks_obtained,
        total_marks,
        percentage,
        letter_grade,
        semester,
        term,
    ) in grades
    {
        let grade = grades::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(id(student_id)),
            teacher_id: Set(id(TEST_TEACHER_ID)),
            subject_id: Set(id(subject_id)),
            assessment_name: Set(assessment_name.to_string()),
            assessment_kind: Set(assessment_kind),
            marks_obtained: Set(dec(marks_obtained)),
            total_marks: Set(dec(total_marks)),
            percentage: Set(dec(percentage)),
            letter_grade: Set(letter_grade.to_string()),
            academic_year: Set("2025-26".to_string()),
            semester: Set(semester.map(String::from)),
            term: Set(term.map(String::from)),
            remarks: Set(None),
            is_published: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };

        if let Err(e) = grade.insert(db).await {
            eprintln!("Failed to insert grade {assessment_name}: {e}");
        } else {
            println!("  Created grade: {assessment_name}");
        }
    }
}
