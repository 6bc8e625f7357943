use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::users::repo::Role;

struct SeedMentor {
    name: &'static str,
    email: &'static str,
    college: &'static str,
    years_experience: i32,
    expertise: &'static [&'static str],
    bio: &'static str,
    rating: f64,
}

const STUDENTS: &[(&str, &str, &str)] = &[
    ("Saikanth", "saikanth@gmail.com", "IIT Hyderabad"),
    ("Harsha", "harsha@gmail.com", "NIT Warangal"),
    ("Praveen", "praveen@gmail.com", "SRM University"),
    ("Likith", "likith@gmail.com", "VIT Chennai"),
    ("Bhavana", "bhavana@gmail.com", "PES University"),
    ("Kiran", "kiran@gmail.com", "JNTU Hyderabad"),
    ("Divya", "divya@gmail.com", "Osmania University"),
    ("Rakesh", "rakesh@gmail.com", "Amrita University"),
    ("Sneha", "sneha@gmail.com", "Christ University"),
    ("Arjun", "arjun@gmail.com", "Anna University"),
    ("Rithika", "rithika@gmail.com", "IIT Hyderabad"),
    ("Goutham", "goutham@gmail.com", "NIT Warangal"),
    ("Nikhil", "nikhil@gmail.com", "SRM University"),
    ("Lavanya", "lavanya@gmail.com", "VIT Chennai"),
    ("Suresh", "suresh@gmail.com", "PES University"),
    ("Manasa", "manasa@gmail.com", "JNTU Hyderabad"),
    ("Chaitanya", "chaitanya@gmail.com", "Osmania University"),
    ("Teja", "teja@gmail.com", "Amrita University"),
    ("Pooja", "pooja@gmail.com", "Christ University"),
    ("Rajesh", "rajesh@gmail.com", "Anna University"),
];

const MENTORS: &[SeedMentor] = &[
    SeedMentor {
        name: "Dr. Ravi Kumar",
        email: "ravikumar@gmail.com",
        college: "IIT Madras",
        years_experience: 10,
        expertise: &["AI", "ML"],
        bio: "Passionate about AI/ML research and helping students navigate their career paths. Over 10 years of industry experience.",
        rating: 4.8,
    },
    SeedMentor {
        name: "Anjali Mehta",
        email: "anjalimehta@gmail.com",
        college: "Delhi University",
        years_experience: 8,
        expertise: &["Marketing", "Strategy"],
        bio: "Marketing strategist with a focus on digital transformation. Love mentoring students in business strategy.",
        rating: 4.6,
    },
    SeedMentor {
        name: "Vijay Rao",
        email: "vijayrao@gmail.com",
        college: "NIT Trichy",
        years_experience: 7,
        expertise: &["Data Science", "Cloud"],
        bio: "Data scientist specializing in cloud-based solutions. Helping students build strong technical foundations.",
        rating: 4.7,
    },
    SeedMentor {
        name: "Sneha Patel",
        email: "snehapatel@gmail.com",
        college: "BITS Pilani",
        years_experience: 6,
        expertise: &["Software Engineering"],
        bio: "Senior software engineer with expertise in full-stack development. Dedicated to student success.",
        rating: 4.9,
    },
    SeedMentor {
        name: "Rohan Sharma",
        email: "rohansharma@gmail.com",
        college: "SRM University",
        years_experience: 5,
        expertise: &["Cybersecurity"],
        bio: "Cybersecurity expert helping students understand the importance of security in modern applications.",
        rating: 4.5,
    },
    SeedMentor {
        name: "Kavya Iyer",
        email: "kavyaiyer@gmail.com",
        college: "VIT Vellore",
        years_experience: 9,
        expertise: &["Full Stack Dev"],
        bio: "Full-stack developer with a passion for teaching modern web technologies to aspiring developers.",
        rating: 4.8,
    },
    SeedMentor {
        name: "Arjun Menon",
        email: "arjunmenon@gmail.com",
        college: "PES University",
        years_experience: 4,
        expertise: &["Web Technologies"],
        bio: "Web developer specializing in React and Node.js. Helping students build real-world projects.",
        rating: 4.4,
    },
    SeedMentor {
        name: "Nisha Verma",
        email: "nishaverma@gmail.com",
        college: "Osmania University",
        years_experience: 6,
        expertise: &["Databases"],
        bio: "Database architect with experience in SQL and NoSQL systems. Mentoring students in data modeling.",
        rating: 4.6,
    },
    SeedMentor {
        name: "Rakesh Gupta",
        email: "rakeshgupta@gmail.com",
        college: "JNTU Hyderabad",
        years_experience: 7,
        expertise: &["Embedded Systems"],
        bio: "Embedded systems engineer passionate about IoT and hardware-software integration.",
        rating: 4.5,
    },
    SeedMentor {
        name: "Priya Sharma",
        email: "priyasharma@gmail.com",
        college: "Amity University",
        years_experience: 8,
        expertise: &["Project Management"],
        bio: "Certified PMP with expertise in agile methodologies. Helping students develop leadership skills.",
        rating: 4.7,
    },
];

async fn insert_user(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    college: Option<&str>,
    bio: Option<&str>,
    skills: &[&str],
    expertise: &[&str],
    years_experience: Option<i32>,
    photo: Option<&str>,
    rating: f64,
) -> anyhow::Result<()> {
    let hash = hash_password(password)?;
    let skills: Vec<String> = skills.iter().map(|s| s.to_string()).collect();
    let expertise: Vec<String> = expertise.iter().map(|s| s.to_string()).collect();
    sqlx::query(
        r#"
        INSERT INTO users
            (id, email, name, password_hash, role, college, bio, skills, expertise,
             years_experience, photo, rating)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(&hash)
    .bind(role.as_str())
    .bind(college)
    .bind(bio)
    .bind(&skills)
    .bind(&expertise)
    .bind(years_experience)
    .bind(photo)
    .bind(rating)
    .execute(db)
    .await?;
    Ok(())
}

/// Seeds sample students, mentors and the admin account. Runs only against
/// an empty users table, so restarts are no-ops.
pub async fn seed_sample_data(db: &PgPool) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    for (name, email, college) in STUDENTS {
        insert_user(
            db,
            name,
            email,
            &name.to_lowercase(),
            Role::Student,
            Some(college),
            Some("Eager to learn and grow in my career."),
            &["Python", "JavaScript"],
            &[],
            None,
            None,
            0.0,
        )
        .await?;
    }

    for mentor in MENTORS {
        let first_name = mentor.name.split_whitespace().next().unwrap_or(mentor.name);
        let photo = format!(
            "https://ui-avatars.com/api/?name={}&size=200&background=2C3EAA&color=fff",
            mentor.name.replace(' ', "+")
        );
        insert_user(
            db,
            mentor.name,
            mentor.email,
            &first_name.to_lowercase(),
            Role::Mentor,
            Some(mentor.college),
            Some(mentor.bio),
            &[],
            mentor.expertise,
            Some(mentor.years_experience),
            Some(&photo),
            mentor.rating,
        )
        .await?;
    }

    insert_user(
        db,
        "Admin",
        "admin@mentorbridge.com",
        "admin123",
        Role::Admin,
        None,
        Some("Platform administrator"),
        &[],
        &[],
        None,
        None,
        0.0,
    )
    .await?;

    info!("sample data seeded");
    Ok(())
}
