// Prompt templates for job description analysis.

pub const REQUIREMENTS_SYSTEM: &str = r#"You are an expert recruiter and job description parser. Extract key information from the job description to help optimize a resume.

Your task is to extract:
1. Key skills required (technical and soft skills)
2. Key responsibilities and duties
3. Job role/title
4. Seniority level (junior/mid/senior/lead/principal)
5. Technologies and tech stack mentioned

Return a JSON object with this exact structure:
{
  "jobKeySkills": ["skill1", "skill2"],
  "jobKeyResponsibilities": ["responsibility1", "responsibility2"],
  "role": "Job Title",
  "seniority": "junior|mid|senior|lead|principal",
  "techStack": ["tech1", "tech2"]
}

Be thorough and extract all relevant information. {json_only}"#;

pub const REQUIREMENTS_PROMPT_TEMPLATE: &str = r#"Extract key requirements from this job description:

{jd}

Return a JSON object with the structure specified above."#;

pub const WEIGHTS_SYSTEM: &str = r#"You are an expert resume optimization strategist. Analyze a job description and determine which resume sections should receive the most emphasis.

You need to assign weights to these sections:
- summary: Professional summary/objective
- skills: Technical and soft skills
- experience: Work experience and responsibilities
- projects: Personal or professional projects
- education: Educational background

The weights must sum to 1.0 (100%).

Consider:
- If the job description emphasizes specific technologies, increase the skills weight
- If it emphasizes years of experience or responsibilities, increase the experience weight
- If it emphasizes projects or portfolios, increase the projects weight
- If it requires specific degrees or certifications, increase the education weight
- Summary should always have some weight (0.05-0.15)

Return a JSON object with this exact structure:
{
  "sectionWeights": {
    "summary": 0.10,
    "skills": 0.35,
    "experience": 0.35,
    "projects": 0.15,
    "education": 0.05
  },
  "focusAreas": ["area1", "area2"],
  "optimizationStrategy": "Brief description of optimization approach"
}

The weights MUST sum to exactly 1.0. {json_only}"#;

pub const WEIGHTS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and assign section weights:

JOB DESCRIPTION:
{jd}

EXTRACTED KEY DATA:
- Role: {role}
- Seniority: {seniority}
- Key Skills: {key_skills}
- Key Responsibilities: {key_responsibilities}

Determine which sections should receive the most emphasis and assign weights accordingly."#;
