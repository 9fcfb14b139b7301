//! Courses, enrollments, and assignments migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(COURSES_SQL).await?;
        db.execute_unprepared(ENROLLMENTS_SQL).await?;
        db.execute_unprepared(ASSIGNMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS assignment_students CASCADE;
            DROP TABLE IF EXISTS assignments CASCADE;
            DROP TABLE IF EXISTS enrollments CASCADE;
            DROP TABLE IF EXISTS courses CASCADE;
            DROP TYPE IF EXISTS assignment_kind;
            DROP TYPE IF EXISTS enrollment_status;
            ",
        )
        .await?;

        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE enrollment_status AS ENUM ('active', 'dropped', 'completed');
CREATE TYPE assignment_kind AS ENUM ('homework', 'assignment');
";

const COURSES_SQL: &str = r"
CREATE TABLE courses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(32) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    credits INTEGER NOT NULL DEFAULT 1 CHECK (credits > 0),
    teacher_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    max_students INTEGER NOT NULL DEFAULT 30 CHECK (max_students > 0),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_courses_teacher ON courses(teacher_id);
CREATE INDEX idx_courses_active ON courses(is_active);
";

const ENROLLMENTS_SQL: &str = r"
CREATE TABLE enrollments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    student_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    course_id UUID NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    status enrollment_status NOT NULL DEFAULT 'active',
    enrolled_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_enrollments_student_course UNIQUE (student_id, course_id)
);

-- Capacity checks count active enrollments per course
CREATE INDEX idx_enrollments_course ON enrollments(course_id) WHERE status = 'active';
CREATE INDEX idx_enrollments_student ON enrollments(student_id);
";

const ASSIGNMENTS_SQL: &str = r"
CREATE TABLE assignments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(255) NOT NULL,
    description TEXT,
    kind assignment_kind,
    teacher_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    due_date DATE NOT NULL,
    due_time TIME,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_assignments_teacher ON assignments(teacher_id, due_date);

CREATE TABLE assignment_students (
    assignment_id UUID NOT NULL REFERENCES assignments(id) ON DELETE CASCADE,
    student_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    PRIMARY KEY (assignment_id, student_id)
);

CREATE INDEX idx_assignment_students_student ON assignment_students(student_id);
";
