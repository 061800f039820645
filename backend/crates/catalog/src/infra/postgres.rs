//! PostgreSQL Course Repository

use chrono::{DateTime, Utc};
use kernel::id::CourseId;
use sqlx::PgPool;
use table_query::{ListPlan, ListRequest};
use uuid::Uuid;

use crate::domain::{Course, CourseLevel, CourseRepository, CourseTitle, PriceCents, Visibility};
use crate::error::{CatalogError, CatalogResult};

const SELECT_COURSES: &str = "SELECT id, title, description, level, price_cents, published, \
                              created_at, updated_at FROM courses";

#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CourseRepository for PgCourseRepository {
    async fn create(&self, course: &Course) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO courses (
                id,
                title,
                description,
                level,
                price_cents,
                published,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(course.title.as_str())
        .bind(&course.description)
        .bind(course.level.code())
        .bind(course.price_cents.get())
        .bind(course.published)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> CatalogResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(&format!("{SELECT_COURSES} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(CourseRow::into_course).transpose()
    }

    async fn update(&self, course: &Course) -> CatalogResult<()> {
        sqlx::query(
            r#"
            UPDATE courses SET
                title = $2,
                description = $3,
                level = $4,
                price_cents = $5,
                published = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(course.title.as_str())
        .bind(&course.description)
        .bind(course.level.code())
        .bind(course.price_cents.get())
        .bind(course.published)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &CourseId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        request: &ListRequest,
        visibility: Visibility,
    ) -> CatalogResult<(Vec<Course>, u64)> {
        let mut plan = ListPlan::new(request, visibility.columns());
        if let Some(condition) = visibility.base_condition() {
            plan = plan.with_condition(condition);
        }

        let mut count = plan.count_query("FROM courses");
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut page = plan.page_query(SELECT_COURSES);
        let rows = page
            .build_query_as::<CourseRow>()
            .fetch_all(&self.pool)
            .await?;

        let courses = rows
            .into_iter()
            .map(CourseRow::into_course)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok((courses, u64::try_from(total).unwrap_or(0)))
    }
}

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: String,
    level: String,
    price_cents: i64,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self) -> CatalogResult<Course> {
        let level = CourseLevel::from_code(&self.level).ok_or_else(|| {
            CatalogError::Internal(format!("Invalid course level in database: {}", self.level))
        })?;

        Ok(Course {
            id: CourseId::from_uuid(self.id),
            title: CourseTitle::from_db(self.title),
            description: self.description,
            level,
            price_cents: PriceCents::from_db(self.price_cents),
            published: self.published,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
