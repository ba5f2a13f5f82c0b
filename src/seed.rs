use crate::models::{Course, Level, Role, User};

fn modules(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn demo_courses() -> Vec<Course> {
    vec![
        Course {
            id: "1".to_string(),
            title: "Introduction to Programming".to_string(),
            description: "Learn the fundamentals of programming with Python. Perfect for beginners who want to start their coding journey.".to_string(),
            instructor: "Dr. Sarah Johnson".to_string(),
            duration: "8 weeks".to_string(),
            level: Level::Beginner,
            image: "/src/assets/programming-course.jpg".to_string(),
            price: 199.0,
            category: "Programming".to_string(),
            modules: modules(&[
                "Introduction to Programming Concepts",
                "Variables and Data Types",
                "Control Structures",
                "Functions and Methods",
                "Object-Oriented Programming",
                "File Operations",
                "Error Handling",
                "Final Project",
            ]),
            rating: 4.8,
            students: 2847,
        },
        Course {
            id: "2".to_string(),
            title: "Data Science & Machine Learning".to_string(),
            description: "Master data analysis, visualization, and machine learning algorithms using Python, pandas, and scikit-learn.".to_string(),
            instructor: "Prof. Michael Chen".to_string(),
            duration: "12 weeks".to_string(),
            level: Level::Intermediate,
            image: "/src/assets/data-science-course.jpg".to_string(),
            price: 299.0,
            category: "Data Science".to_string(),
            modules: modules(&[
                "Data Analysis with Pandas",
                "Data Visualization",
                "Statistical Analysis",
                "Machine Learning Fundamentals",
                "Supervised Learning",
                "Unsupervised Learning",
                "Deep Learning Basics",
                "Real-world Projects",
            ]),
            rating: 4.9,
            students: 1923,
        },
        Course {
            id: "3".to_string(),
            title: "Full-Stack Web Development".to_string(),
            description: "Build modern web applications using React, Node.js, and MongoDB. From frontend to backend development.".to_string(),
            instructor: "Alex Rodriguez".to_string(),
            duration: "16 weeks".to_string(),
            level: Level::Advanced,
            image: "/src/assets/web-dev-course.jpg".to_string(),
            price: 399.0,
            category: "Web Development".to_string(),
            modules: modules(&[
                "HTML, CSS & JavaScript Fundamentals",
                "React.js Development",
                "State Management",
                "Backend with Node.js",
                "Database Design with MongoDB",
                "API Development",
                "Authentication & Security",
                "Deployment & DevOps",
            ]),
            rating: 4.7,
            students: 3156,
        },
    ]
}

pub fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "admin1".to_string(),
            email: "admin@courseplatform.com".to_string(),
            name: "Admin User".to_string(),
            role: Role::Admin,
            enrolled_courses: Vec::new(),
        },
        User {
            id: "student1".to_string(),
            email: "student@demo.com".to_string(),
            name: "Demo Student".to_string(),
            role: Role::Student,
            enrolled_courses: Vec::new(),
        },
    ]
}
