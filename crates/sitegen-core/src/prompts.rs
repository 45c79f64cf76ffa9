//! Prompt templates
//!
//! Fixed instruction blocks combined with user text before dispatch to the
//! model. The templates never change at runtime.

use crate::llm::GenerationConfig;

/// Guideline appended to chat prompts
pub const CHAT_PROMPT: &str = r#"
You are an AI Assistant and experienced in React Development.
GUIDELINE:
- Tell user what you are building
- Response in few lines
- Skip code examples and commentary
"#;

/// Project generation rules appended to code generation prompts
pub const CODE_GEN_PROMPT: &str = r#"
Generate a fully structured React project using Vite.  
Ensure the project follows best practices in component organization and styling.  

**Project Requirements:**  
- Use **React** as the framework.  
- Add as many functional features as possible.  
- **Do not create an App.jsx file. Use App.js instead** and modify it accordingly.  
- Use **Tailwind CSS** for styling and create a modern, visually appealing UI.  
- Organize components **modularly** into a well-structured folder system (/components, /pages, /styles, etc.).  
- Include reusable components like **buttons, cards, and forms** where applicable.  
- Use **lucide-react** icons if needed for UI enhancement.  
- Do not create a src folder.

**Image Handling Guidelines:**  
- Instead, use **Unsplash API**, royalty-free image sources (e.g., Pexels, Pixabay).
- Do not use images from unsplash.com.
- use images from the internet.

**Dependencies to Use:**  
- "postcss": "^8"  
- "tailwindcss": "^3.4.1"  
- "autoprefixer": "^10.0.0"  
- "uuid4": "^2.0.3"  
- "tailwind-merge": "^2.4.0"  
- "tailwindcss-animate": "^1.0.7"  
- "lucide-react": "latest"  
- "react-router-dom": "latest"  
- "firebase": "^11.1.0"  
- "@google/generative-ai": "^0.21.0"  
- "@headlessui/react": "^1.7.17"  
- "framer-motion": "^10.0.0"  
- "react-icons": "^5.0.0"  
- "uuid": "^11.1.0"  
- "@mui/material": "^6.4.6"  

Return the response in JSON format with the following schema:
{
  "projectTitle": "",
  "explanation": "",
  "files": {
    "/App.js": {
      "code": ""
    },
    ...
  },
  "generatedFiles": []
}

Generate a programming code structure for a React project using Vite.
Do not create a App.jsx file. There is a App.js file in the project structure, rewrite it.
Use Tailwind css for styling. Create a well Designed UI. 

Ensure the files field contains all the created files, and the generatedFiles field contains the list of generated files.

Also update the Package.json file with the needed dependencies.

Additionally, include an explanation of the project's structure, purpose, and additional instructions:
- For placeholder images use appropriate URLs.
- Add external images if needed.
- The lucide-react library is also available to be imported IF NECESSARY.
- Update the package.json file with the required dependencies.
- Do not use backend or database related.
"#;

/// Rules prepended to prompt enhancement requests
pub const ENHANCE_PROMPT_RULES: &str = r#"
You are a prompt enhancement expert and website designer(React + vite). Your task is to improve the given user prompt by:
1. Making it more specific and detailed but..
2. Including clear requirements and constraints
3. Maintaining the original intent of the prompt
4. Using clear and precise language
5. Adding specific UI/UX requirements if applicable
- Responsive navigation menu  
- Hero section with image background  
- Card grid with hover animations  
- Contact form with validation  
- Smooth page transitions  
6. Dont use the backend or database related.
7. Keep it less than 300 words

Return only the enhanced prompt as plain text without any JSON formatting or additional explanations.
"#;

/// Final instruction on code generation prompts
pub const JSON_ONLY_INSTRUCTION: &str =
    "IMPORTANT: Return ONLY valid JSON format as specified in the schema above.";

/// The three AI operations exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Chat,
    Enhance,
    CodeGeneration,
}

impl PromptKind {
    /// Assemble the full prompt sent to the model
    pub fn build(&self, user_prompt: &str) -> String {
        match self {
            PromptKind::Chat => chat_prompt(user_prompt),
            PromptKind::Enhance => enhance_prompt(user_prompt),
            PromptKind::CodeGeneration => code_gen_prompt(user_prompt),
        }
    }

    /// Sampling configuration for this operation
    pub fn generation_config(&self) -> GenerationConfig {
        match self {
            PromptKind::Chat => GenerationConfig::chat(),
            PromptKind::Enhance => GenerationConfig::enhance(),
            PromptKind::CodeGeneration => GenerationConfig::code_generation(),
        }
    }

    /// Prefix for error details reported to the caller
    pub fn error_context(&self) -> &'static str {
        match self {
            PromptKind::Chat => "AI chat error",
            PromptKind::Enhance => "Prompt enhancement error",
            PromptKind::CodeGeneration => "Code generation error",
        }
    }
}

pub fn chat_prompt(user_prompt: &str) -> String {
    format!("{} {}", user_prompt, CHAT_PROMPT)
}

pub fn enhance_prompt(user_prompt: &str) -> String {
    format!("{}\n\nOriginal prompt: {}", ENHANCE_PROMPT_RULES, user_prompt)
}

pub fn code_gen_prompt(user_prompt: &str) -> String {
    format!(
        "{} {}\n\n{}",
        user_prompt, CODE_GEN_PROMPT, JSON_ONLY_INSTRUCTION
    )
}
