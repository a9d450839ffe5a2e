//! Writer options

/// Names the artifact writer uses for generated symbols and macros.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Prefix of the loader entry point and its typedefs (`glsysLoadFunctions`).
    pub loader_prefix: String,
    /// Prefix of the header's include guard; the feature name is appended.
    pub include_guard_prefix: String,
    /// Prefix of the selected-feature macros (`GLSYS_FEATURE_VERSION`).
    pub version_macro_prefix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            loader_prefix: "glsys".to_string(),
            include_guard_prefix: "GL_SYS_GENERATED_H_".to_string(),
            version_macro_prefix: "GLSYS_FEATURE".to_string(),
        }
    }
}

impl EmitOptions {
    /// `glsysFuncPtr`
    pub fn func_ptr_type(&self) -> String {
        format!("{}FuncPtr", self.loader_prefix)
    }

    /// `glsysFunctionLoader`
    pub fn function_loader_type(&self) -> String {
        format!("{}FunctionLoader", self.loader_prefix)
    }

    /// `glsysLoadFunctions`
    pub fn load_functions_name(&self) -> String {
        format!("{}LoadFunctions", self.loader_prefix)
    }

    /// Prototype shared by the header declaration and the loader definition.
    pub fn load_functions_signature(&self) -> String {
        format!(
            "int {}({} functionLoader)",
            self.load_functions_name(),
            self.function_loader_type()
        )
    }

    pub fn include_guard(&self, feature: &str) -> String {
        format!("{}{feature}", self.include_guard_prefix)
    }
}
