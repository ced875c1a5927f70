//! Sample content for a fresh portfolio

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use folio_db::{Database, NewBlogPost, NewExperience, NewProject, NewSkill};
use tracing::info;

/// Record counts written by [`seed`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub projects: usize,
    pub blog_posts: usize,
    pub skills: usize,
    pub experiences: usize,
}

/// Replace all portfolio content with the sample set
///
/// The administrator and received contact messages are left alone.
pub async fn seed(db: &Database) -> Result<SeedSummary> {
    db.clear_content()
        .await
        .context("Failed to clear existing content")?;

    let mut summary = SeedSummary::default();

    for project in sample_projects() {
        db.insert_project(project).await?;
        summary.projects += 1;
    }
    for post in sample_blog_posts() {
        db.insert_blog_post(post).await?;
        summary.blog_posts += 1;
    }
    for skill in sample_skills() {
        db.insert_skill(skill).await?;
        summary.skills += 1;
    }
    for exp in sample_experiences() {
        db.insert_experience(exp).await?;
        summary.experiences += 1;
    }

    info!(
        "Seeded {} projects, {} blog posts, {} skills, {} experiences",
        summary.projects, summary.blog_posts, summary.skills, summary.experiences
    );
    Ok(summary)
}

fn date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Digital Certificate Management System".to_string(),
            description: "A full-stack digital certificate management system with secure \
                          certificate generation, validation and an admin dashboard."
                .to_string(),
            technologies: strings(&["React", "Flask", "MongoDB", "Python", "JavaScript"]),
            image_url: Some(
                "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            github_url: Some(
                "https://github.com/yogeshmagatam/Digital-Certificate-Management-System"
                    .to_string(),
            ),
            live_url: None,
            featured: true,
            created_at: date(2023, 12, 1),
        },
        NewProject {
            title: "Pi Ads".to_string(),
            description: "Displays ads on screens driven by a Raspberry Pi, with remote ad \
                          management, scheduling and live content updates."
                .to_string(),
            technologies: strings(&["Python", "Raspberry Pi", "Linux", "GPIO"]),
            image_url: Some(
                "https://images.unsplash.com/photo-1611224923853-80b023f02d71?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            github_url: Some("https://github.com/yogeshmagatam/Pi-Ads".to_string()),
            live_url: None,
            featured: true,
            created_at: date(2023, 11, 15),
        },
        NewProject {
            title: "Portfolio Website".to_string(),
            description: "A responsive portfolio site with dark mode, a contact form and an \
                          admin dashboard for content management."
                .to_string(),
            technologies: strings(&["React", "Rust", "SQLite", "Tailwind CSS"]),
            image_url: Some(
                "https://images.unsplash.com/photo-1504608524841-42fe6f032b4b?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            github_url: Some("https://github.com/yogeshmagatam/portfolio-website".to_string()),
            live_url: None,
            featured: false,
            created_at: date(2023, 10, 20),
        },
    ]
}

fn sample_blog_posts() -> Vec<NewBlogPost> {
    vec![
        NewBlogPost {
            title: "Building a Digital Certificate Management System".to_string(),
            content: "A walk through building a secure certificate management system, from \
                      the data model to the admin dashboard..."
                .to_string(),
            excerpt: "How to build a secure certificate management system end to end."
                .to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            tags: strings(&["React", "Flask", "Python", "Web Development", "Security"]),
            published: true,
            created_at: date(2023, 12, 15),
        },
        NewBlogPost {
            title: "IoT Development with Raspberry Pi: Building Pi Ads".to_string(),
            content: "Building applications that talk to hardware and drive digital signage \
                      with a Raspberry Pi..."
                .to_string(),
            excerpt: "Using a Raspberry Pi for digital signage and automation.".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            tags: strings(&["Raspberry Pi", "IoT", "Python", "Hardware", "Automation"]),
            published: true,
            created_at: date(2023, 12, 10),
        },
    ]
}

fn sample_skills() -> Vec<NewSkill> {
    [
        ("Python", "languages", 5, "python"),
        ("JavaScript", "languages", 5, "javascript"),
        ("React", "frontend", 5, "react"),
        ("Flask", "backend", 5, "flask"),
        ("MongoDB", "database", 4, "mongodb"),
        ("Raspberry Pi", "iot", 4, "raspberrypi"),
        ("FastAPI", "backend", 4, "fastapi"),
        ("Tailwind CSS", "frontend", 4, "tailwind"),
    ]
    .into_iter()
    .map(|(name, category, level, icon)| NewSkill {
        name: name.to_string(),
        category: category.to_string(),
        level,
        icon: Some(icon.to_string()),
    })
    .collect()
}

fn sample_experiences() -> Vec<NewExperience> {
    vec![
        NewExperience {
            company: "Still in Search".to_string(),
            position: "Full Stack Developer".to_string(),
            description: "Looking for opportunities to apply React, Python and IoT \
                          development skills."
                .to_string(),
            start_date: "2024-01".to_string(),
            end_date: None,
            technologies: strings(&["React", "Python", "Flask", "MongoDB", "Raspberry Pi"]),
        },
        NewExperience {
            company: "Student Projects".to_string(),
            position: "Software Developer".to_string(),
            description: "Built the Digital Certificate Management System and Pi Ads."
                .to_string(),
            start_date: "2022-01".to_string(),
            end_date: Some("2023-12".to_string()),
            technologies: strings(&["React", "Flask", "Python", "MongoDB", "Raspberry Pi"]),
        },
    ]
}
