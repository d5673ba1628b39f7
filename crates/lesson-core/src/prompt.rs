//! Instruction text sent to the completion boundary.
//!
//! Every builder here is a pure function of its arguments: the same inputs
//! always produce byte-identical prompts.

pub const LESSON_WRITER_SYSTEM: &str =
    "You are an expert technical writer creating interactive tutorials.";

pub const DEVOPS_SYSTEM: &str = "You are a DevOps expert writing Dockerfiles.";

pub const EDITOR_SYSTEM: &str = "You are a helpful coding assistant.";

/// Wrap an acquired excerpt the way the lesson prompt expects it.
pub fn grounding_block(excerpt: &str) -> String {
    format!("\nSource Content:\n{excerpt}\n")
}

/// Request a lesson plan as a JSON object.
///
/// `grounding` is embedded verbatim. Its size is bounded at acquisition
/// time, not here.
pub fn lesson_plan_prompt(topic: &str, objectives: &str, level: &str, grounding: &str) -> String {
    format!(
        r#"Create a tutorial lesson plan for the topic: "{topic}".
Target Audience Level: {level}
Learning Objectives: {objectives}

Source Material (use this as context if provided):
{grounding}

The output must be a valid JSON object with the following structure:
{{
    "title": "Lesson Title",
    "description": "Brief description of the lesson.",
    "steps": [
        {{
            "title": "Step Title",
            "section": "Section Name",
            "content": "The MDX content for this step. Use markdown formatting. Include code examples and explanation.",
            "order": 1
        }}
    ]
}}

Ensure the content is educational, interactive, and follows a logical progression.
The "content" field should be the actual tutorial text for that step, formatted in MDX.
"#
    )
}

/// Request a Dockerfile describing the tutorial's runtime environment.
pub fn environment_prompt(
    name: &str,
    description: &str,
    base_image: &str,
    lessons_env_var: &str,
) -> String {
    format!(
        r#"Create a Dockerfile for a tutorial environment.
Tutorial Name: {name}
Description of environment needs: {description}

Base Image: The Dockerfile MUST start with `FROM {base_image}`.
This base image already includes Ubuntu 24.04, Java 25, Maven, Gradle, and common tools (git, curl, vim, nano).

Your task is to add any additional tools or configurations required by the description.

Also, set the environment variable `{lessons_env_var}` to `classpath:/lessons/{name}`.

Output ONLY the content of the Dockerfile. Do not include markdown code blocks.
"#
    )
}

/// Request a full rewrite of one file according to `instruction`.
pub fn update_prompt(file_content: &str, instruction: &str) -> String {
    format!(
        r#"Update the following file based on the instruction provided.

File Content:
{file_content}

Instruction:
{instruction}

Output ONLY the full updated content of the file. Do not include markdown code blocks.
"#
    )
}
