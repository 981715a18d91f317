//! Built-in content tables

use crate::model::{Achievement, CardSize, Profile, Proficiency, ProjectEntry, SkillEntry, SkillGroup};

use crate::model::Proficiency::{Advanced, Proficient, Working};

pub static PROFILE: Profile = Profile {
    name: "Avery Cohen",
    title: "Computer Science Student @ JCT",
    subhead: "C++ · Python · C#/.NET · SQL · Java · Docker · PostgreSQL · Multithreading · TDD · OSINT",
    availability: "Available 3–4 days/week • From mid-September • US & IL citizenship • GPA ≈ 90",
    email: "hello@example.com",
    github: Some("https://github.com/example"),
    linkedin: Some("https://www.linkedin.com/in/example"),
    resume: Some("/resume.pdf"),
};

pub static PROJECTS: &[ProjectEntry] = &[
    ProjectEntry {
        slug: "metagym",
        name: "MetaGym",
        blurb: "Flutter + FastAPI fitness ecosystem with admin workflows and user engagement tracking.",
        tech: &["Flutter", "Python", "FastAPI", "Redis"],
        repo: None,
        demo: None,
        cover: None,
        gallery: &[],
        size: CardSize::Large,
        hidden: false,
    },
    ProjectEntry {
        slug: "missionforce-2025",
        name: "MissionForce 2025",
        blurb: ".NET 8 WPF volunteer management with N-tier and Observer.",
        tech: &[".NET 8", "WPF", "C#", "EF Core"],
        repo: Some("https://github.com/example/missionforce-2025"),
        demo: None,
        cover: Some("/images/missionforce-1.jpg"),
        gallery: &["/images/missionforce-1.jpg", "/images/missionforce-2.jpg"],
        size: CardSize::Standard,
        hidden: false,
    },
    ProjectEntry {
        slug: "hr-retirement-home",
        name: "HR – Retirement Home",
        blurb: "PostgreSQL system with views, triggers, procedures + medical integration.",
        tech: &["PostgreSQL", "SQL", "Procedures"],
        repo: None,
        demo: None,
        cover: Some("/images/login_screen.png"),
        gallery: &["/images/login_screen.png", "/images/reports_dashboard.png"],
        size: CardSize::Standard,
        hidden: false,
    },
    ProjectEntry {
        slug: "java-ray-tracer",
        name: "Java Ray Tracer",
        blurb: "Physically-based renderer with BVH, reflections, refractions, TDD.",
        tech: &["Java", "BVH", "PBR", "JUnit"],
        repo: None,
        demo: None,
        cover: Some("/images/raytracer-1.jpg"),
        gallery: &["/images/raytracer-1.jpg", "/images/raytracer-2.jpg"],
        size: CardSize::Standard,
        hidden: false,
    },
];

pub static SKILL_GROUPS: &[SkillGroup] = &[
    SkillGroup {
        title: "Languages & Core",
        items: &[
            skill("C++", Advanced, "cplusplus"),
            skill("C# / .NET", Advanced, "csharp"),
            skill("Python", Advanced, "python"),
            skill("Java", Proficient, "java"),
            skill("SQL", Advanced, "postgresql"),
        ],
    },
    SkillGroup {
        title: "Frameworks & Runtime",
        items: &[
            skill("FastAPI", Proficient, "fastapi"),
            skill("WPF (.NET)", Proficient, "dotnet"),
            skill("Flutter", Proficient, "flutter"),
            skill("React", Working, "react"),
            skill("TDD", Proficient, "jest"),
            skill("Clean Architecture", Proficient, "nestjs"),
        ],
    },
    SkillGroup {
        title: "Data & Systems",
        items: &[
            skill("PostgreSQL", Proficient, "postgresql"),
            skill("Docker", Proficient, "docker"),
            skill("Git / GitHub", Advanced, "git"),
            skill("Multithreading", Advanced, "cplusplus"),
            skill("Data Structures & Algorithms", Advanced, "java"),
            skill("Operating Systems", Proficient, "linux"),
            skill("REST APIs", Proficient, "postman"),
        ],
    },
    SkillGroup {
        title: "Cloud, Security & Tools",
        items: &[
            skill("OSINT", Working, "openai"),
            skill("Networking / Wireshark", Proficient, "wireshark"),
            skill("Unix/Linux", Proficient, "linux"),
            skill("Agile", Proficient, "jira"),
            skill("Prompt Engineering", Working, "claude"),
        ],
    },
];

pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        place: "🥇",
        event: "CampAIgn Matcher",
        desc: "Advanced OSINT intelligence gathering tool",
    },
    Achievement {
        place: "🥉",
        event: "MissionForce 2025",
        desc: "Comprehensive volunteer coordination system",
    },
    Achievement {
        place: "🎯",
        event: "ResQdoc",
        desc: "Emergency medical documentation workflow",
    },
];

const fn skill(label: &'static str, tier: Proficiency, icon: &'static str) -> SkillEntry {
    SkillEntry {
        label,
        tier,
        icon: Some(icon),
    }
}
