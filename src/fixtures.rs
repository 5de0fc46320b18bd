#[cfg(test)]
pub mod test {
    use crate::schema::{FieldDescriptor, Schema, SchemaEntry};

    /// Shorthand entries only: two literal defaults and a bare required field.
    pub fn shorthand_schema() -> Schema {
        Schema::new()
            .field("HOST", "localhost")
            .field("PORT", 3000)
            .field("NAME", SchemaEntry::required())
    }

    /// A typical service: one required connection string, everything else
    /// defaulted or optional.
    pub fn service_schema() -> Schema {
        Schema::new()
            .field(
                "DATABASE_URL",
                FieldDescriptor::string()
                    .required()
                    .describe("Connection string for the primary database."),
            )
            .field(
                "PORT",
                FieldDescriptor::number()
                    .default(8080)
                    .min(1.0)
                    .max(65535.0)
                    .describe("Port the HTTP server listens on."),
            )
            .field(
                "LOG_LEVEL",
                FieldDescriptor::string()
                    .default("info")
                    .choices(["debug", "info", "warn", "error"]),
            )
            .field("LOG_FORMAT", FieldDescriptor::string())
            .field(
                "FEATURES",
                FieldDescriptor::object().describe("Feature flags as a JSON object."),
            )
    }

    #[test]
    fn service_schema_normalizes() {
        let schema = service_schema();
        let descriptors = schema.descriptors().unwrap();
        assert_eq!(descriptors.len(), 5);
        let guaranteed: Vec<&str> = descriptors
            .iter()
            .filter(|(_, d)| d.is_guaranteed())
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(guaranteed, vec!["DATABASE_URL", "PORT", "LOG_LEVEL"]);
    }
}
