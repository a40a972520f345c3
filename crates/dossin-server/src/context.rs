//! Domain guidance embedded in tool descriptions.
//!
//! The MCP host reads tool descriptions as instructions, so the Dossin
//! domain model and the component-generation rules travel with the tools.

/// Builds the shared domain context, pointing components at `backend_url`.
#[must_use]
pub fn domain_context(backend_url: &str) -> String {
    format!(
        "DOSSIN - Agricultural Cargo Management System

Platform for the agricultural sector that manages:
- **Appointments (turnos)**: loading/unloading schedules for agricultural products
- **Trucks (camiones)**: transport vehicles (plates, drivers, capacity)
- **Loads (cargas)**: goods and agricultural product operations
- **Drivers (choferes)**: registered drivers
- **Clients (clientes)**: companies and producers
- **Products (productos)**: agricultural catalog (cereals, oilseeds)
- **Destinations (destinos)**: ports, storage facilities, plants

MySQL database with the system's operations.

---

REACT COMPONENT GENERATION - MANDATORY RULES:

Always generate React components for data queries and visualizations.

**1. ATOMIC PRINCIPLE**:
   - Show ONLY the information explicitly requested
   - Do NOT add extra data or unrequested suggestions
   - One single, clear purpose per component

**2. TWO KINDS OF COMPONENTS - ARTIFACT vs DOSSIN COMPONENT**:

   CHAT ARTIFACT (shown in the conversation):
   - Run execute_query FIRST to get real data from the database
   - Hardcode the returned data directly in the component code
   - No fetch(), no useEffect, no loading/error states
   - Example: const turnos = [{{id: 1, hora: '08:00', camion: 'ABC123'}}, ...];

   DOSSIN COMPONENT (for compile_and_save_component):
   - Compiled and saved as a standalone HTML file
   - BEFORE calling compile_and_save_component, TRANSFORM the artifact:
     1. Remove the hardcoded data
     2. Add: const [data, setData] = useState([]);
     3. Add: const [loading, setLoading] = useState(true);
     4. Add: const [error, setError] = useState(null);
     5. Add a useEffect with a dynamic fetch()
   - Endpoint: POST {backend_url}/database/query
   - Body: {{ sql: \"original_query\", params: [] }}
   - Parse: result.data holds the rows
   - Handle the loading and error states
   - The final HTML loads live data from the backend

**3. COMPLETE, WORKING CODE**:
   - Include ALL required imports
   - Responsive design with Tailwind
   - Runnable without modifications
   - Proper error handling

**4. UNRESTRICTED LIBRARIES**:
   - Plain imports: import X from 'library'
   - esbuild bundles them automatically
   - If one is missing, compilation FAILS with a clear error
   - The error names the library to install - STOP and tell the user
   - Installed libraries: react, react-dom, lucide-react, recharts

**CRITICAL REMINDERS**:
- ARTIFACT: hardcoded data (immediate preview in the chat)
- DOSSIN COMPONENT: dynamic fetch (compiled HTML for production)
- Always transform before compiling
- Keep components atomic and specific
- Backend: {backend_url}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_interpolates_backend() {
        let context = domain_context("http://localhost:8080/api");
        assert!(context.contains("POST http://localhost:8080/api/database/query"));
        assert!(context.ends_with("Backend: http://localhost:8080/api"));
        assert!(context.contains("react, react-dom, lucide-react, recharts"));
    }
}
