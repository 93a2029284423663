/// One curated job/resume pair with an expert-assigned expected score.
///
/// Expected scores are rank-order targets spanning the four quality bands,
/// not exact numeric contracts; fusion weights legitimately move absolute
/// values around.
#[derive(Debug, Clone, Copy)]
pub struct GroundTruthCase {
    pub category: &'static str,
    pub job_description: &'static str,
    pub resume: &'static str,
    pub expected_score: f64,
    pub rationale: &'static str,
}

/// The curated ground-truth set: one pair per match-quality band.
pub fn ground_truth_cases() -> Vec<GroundTruthCase> {
    vec![
        GroundTruthCase {
            category: "excellent_match",
            job_description: "Senior Python Developer - 5+ Years Experience\n\nRequirements\nWe need an experienced Python developer with expertise in:\nDjango and Flask frameworks\nPostgreSQL and MongoDB\nAWS cloud services (EC2, S3, RDS)\nREST API development\nDocker and Kubernetes\n5+ years of professional experience\nBachelor degree in Computer Science",
            resume: "John Smith - Senior Python Developer\n\nProfessional Experience\nSenior Software Engineer, 6 years of experience\nDeveloped Python applications using Django and Flask\nManaged PostgreSQL and MongoDB databases\nDeployed applications on AWS (EC2, S3, RDS, Lambda)\nBuilt REST APIs handling heavy daily traffic\nImplemented Docker containerization and Kubernetes orchestration\n\nEducation\nBachelor of Science degree in Computer Science\n\nTechnical Skills\nPython, Django, Flask, PostgreSQL, MongoDB, AWS, Docker, Kubernetes, REST APIs",
            expected_score: 0.92,
            rationale: "Perfect skill alignment, meets experience requirements, strong background",
        },
        GroundTruthCase {
            category: "good_match",
            job_description: "Frontend Developer - React Specialist\n\nRequirements\n3+ years React.js experience\nJavaScript and TypeScript proficiency\nExperience with Redux or similar state management\nHTML5, CSS3, responsive design\nGit version control",
            resume: "Sarah Johnson - Frontend Developer\n\nExperience\nFrontend Developer, 3 years of experience\nBuilt React applications with TypeScript\nUsed Redux for state management\nComponent styling with Bootstrap\nGit workflow and code reviews\nSome exposure to Vue.js\n\nSkills\nReact, JavaScript, TypeScript, Redux, CSS3, HTML5, Git",
            expected_score: 0.78,
            rationale: "Good skill match, meets experience, some bonus skills",
        },
        GroundTruthCase {
            category: "fair_match",
            job_description: "Data Scientist - Machine Learning Focus\n\nRequirements\nPhD or Master degree in Data Science or Statistics\nPython (pandas, scikit-learn, TensorFlow)\nSQL and big data experience\n3+ years machine learning experience\nStatistical modeling expertise",
            resume: "Mike Chen - Software Developer\n\nExperience\nSoftware Developer, 4 years of experience\nPython development for web applications\nSome data analysis with pandas\nBasic SQL queries\n\nEducation\nBachelor degree in Computer Science\n\nSkills\nPython, SQL, pandas, JavaScript, React",
            expected_score: 0.45,
            rationale: "Some Python skills but lacks ML expertise, education gap",
        },
        GroundTruthCase {
            category: "poor_match",
            job_description: "Senior DevOps Engineer\n\nRequirements\n5+ years DevOps experience\nAWS and Azure cloud expertise\nDocker, Kubernetes, Terraform\nCI/CD pipeline management\nLinux system administration\nInfrastructure as code",
            resume: "Lisa Park - Graphic Designer\n\nExperience\nGraphic Designer, 5 years of experience\nCreated visual designs using Photoshop and Illustrator\nBasic HTML and CSS for web design\nCollaborated with marketing teams\nAdobe Creative Suite expertise\n\nSkills\nPhotoshop, Illustrator, InDesign, HTML, CSS",
            expected_score: 0.15,
            rationale: "Completely different field, no relevant technical skills",
        },
    ]
}
