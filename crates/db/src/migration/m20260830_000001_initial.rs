//! Initial database migration.
//!
//! Creates all enums and tables for users, subjects, grades, report cards,
//! attendance, and payments.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(SUBJECTS_SQL).await?;
        db.execute_unprepared(GRADES_SQL).await?;
        db.execute_unprepared(REPORT_CARDS_SQL).await?;
        db.execute_unprepared(ATTENDANCE_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS payments CASCADE;
            DROP TABLE IF EXISTS attendance CASCADE;
            DROP TABLE IF EXISTS report_cards CASCADE;
            DROP TABLE IF EXISTS grades CASCADE;
            DROP TABLE IF EXISTS subjects CASCADE;
            DROP TABLE IF EXISTS users CASCADE;
            DROP TYPE IF EXISTS payment_status;
            DROP TYPE IF EXISTS attendance_status;
            DROP TYPE IF EXISTS assessment_kind;
            DROP TYPE IF EXISTS institution_type;
            DROP TYPE IF EXISTS user_role;
            ",
        )
        .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM ('student', 'teacher', 'admin');
CREATE TYPE institution_type AS ENUM ('school', 'college');
CREATE TYPE assessment_kind AS ENUM ('test', 'assignment', 'quiz', 'exam', 'project');
CREATE TYPE attendance_status AS ENUM ('pending', 'present', 'absent');
CREATE TYPE payment_status AS ENUM ('pending', 'paid', 'failed', 'refunded');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    full_name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role user_role NOT NULL,
    institution_type institution_type NOT NULL,
    class_level INTEGER CHECK (class_level BETWEEN 1 AND 12),
    department VARCHAR(100),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Login lookup
CREATE INDEX idx_users_email ON users(email);

-- Cohort queries: school cohorts by class level, college cohorts by department
CREATE INDEX idx_users_cohort_school ON users(institution_type, class_level)
    WHERE role = 'student';
CREATE INDEX idx_users_cohort_college ON users(institution_type, department)
    WHERE role = 'student';
";

const SUBJECTS_SQL: &str = r"
CREATE TABLE subjects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    code VARCHAR(32) NOT NULL UNIQUE,
    description TEXT,
    credits INTEGER NOT NULL DEFAULT 1 CHECK (credits > 0),
    institution_type institution_type NOT NULL,
    class_level INTEGER,
    department VARCHAR(100),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_subjects_institution ON subjects(institution_type, is_active);
";

const GRADES_SQL: &str = r"
CREATE TABLE grades (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    teacher_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    subject_id UUID NOT NULL REFERENCES subjects(id) ON DELETE RESTRICT,
    assessment_name VARCHAR(255) NOT NULL,
    assessment_kind assessment_kind NOT NULL,
    marks_obtained NUMERIC(8, 2) NOT NULL CHECK (marks_obtained >= 0),
    total_marks NUMERIC(8, 2) NOT NULL CHECK (total_marks > 0),
    percentage NUMERIC(8, 4) NOT NULL,
    letter_grade VARCHAR(2) NOT NULL,
    academic_year VARCHAR(16) NOT NULL,
    semester VARCHAR(32),
    term VARCHAR(32),
    remarks TEXT,
    is_published BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_grades_marks_within_total CHECK (marks_obtained <= total_marks)
);

-- Student summary reads: published grades for one student and period
CREATE INDEX idx_grades_student_period ON grades(student_id, academic_year)
    WHERE is_published;
CREATE INDEX idx_grades_teacher ON grades(teacher_id, created_at DESC);
CREATE INDEX idx_grades_subject ON grades(subject_id);
";

const REPORT_CARDS_SQL: &str = r"
CREATE TABLE report_cards (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    teacher_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    subject_id UUID NOT NULL REFERENCES subjects(id) ON DELETE RESTRICT,
    academic_year VARCHAR(16) NOT NULL,
    semester VARCHAR(32),
    term VARCHAR(32),
    marks_obtained NUMERIC(8, 2) NOT NULL CHECK (marks_obtained >= 0),
    total_marks NUMERIC(8, 2) NOT NULL CHECK (total_marks > 0),
    percentage NUMERIC(8, 4) NOT NULL,
    letter_grade VARCHAR(2) NOT NULL,
    grade_points NUMERIC(3, 1) NOT NULL,
    classes_attended INTEGER NOT NULL DEFAULT 0 CHECK (classes_attended >= 0),
    total_classes INTEGER NOT NULL DEFAULT 0 CHECK (total_classes >= 0),
    attendance_percentage NUMERIC(8, 4) NOT NULL DEFAULT 0,
    teacher_remarks TEXT,
    strengths TEXT,
    areas_for_improvement TEXT,
    is_published BOOLEAN NOT NULL DEFAULT FALSE,
    is_final BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_report_cards_marks_within_total CHECK (marks_obtained <= total_marks),
    CONSTRAINT chk_report_cards_attended_within_total CHECK (classes_attended <= total_classes)
);

CREATE INDEX idx_report_cards_student_period ON report_cards(student_id, academic_year)
    WHERE is_published;
CREATE INDEX idx_report_cards_teacher ON report_cards(teacher_id, created_at DESC);
CREATE INDEX idx_report_cards_subject ON report_cards(subject_id);
";

const ATTENDANCE_SQL: &str = r"
CREATE TABLE attendance (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    teacher_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    date DATE NOT NULL,
    status attendance_status NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_attendance_student_date UNIQUE (student_id, date)
);

CREATE INDEX idx_attendance_student ON attendance(student_id, date DESC);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount NUMERIC(12, 2) NOT NULL CHECK (amount > 0),
    currency VARCHAR(3) NOT NULL DEFAULT 'INR',
    purpose VARCHAR(64) NOT NULL,
    description TEXT,
    reference VARCHAR(255),
    status payment_status NOT NULL DEFAULT 'pending',
    paid_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payments_paid_at CHECK (status IN ('paid', 'refunded') OR paid_at IS NULL)
);

CREATE INDEX idx_payments_student ON payments(student_id, created_at DESC);
CREATE INDEX idx_payments_status ON payments(status);
";
