//! Remote endpoint table.

/// Known entity kinds and their remote endpoint paths.
///
/// All endpoints are read-only GET tables on the remote API; the mirror
/// ships a field mapping for a subset of them.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("alunos", "/v2/tabela/alunos"),
    ("cursos", "/v2/tabela/cursos"),
    ("disciplinas", "/v2/tabela/disciplinas"),
    ("turmas", "/v2/tabela/turmas"),
    ("docentes", "/v2/tabela/docente"),
    ("matriculas", "/v2/tabela/matriculas"),
    ("curriculos", "/v2/tabela/curriculos"),
    ("grades", "/v2/tabela/grades"),
    ("coordenacao", "/v2/tabela/coordenacao"),
    ("turma_docente", "/v2/tabela/turma-docente"),
];

/// Returns the endpoint path for an entity kind, if known.
pub fn endpoint_for(kind: &str) -> Option<&'static str> {
    ENDPOINTS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, path)| *path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(endpoint_for("alunos"), Some("/v2/tabela/alunos"));
        assert_eq!(endpoint_for("turma_docente"), Some("/v2/tabela/turma-docente"));
        assert_eq!(endpoint_for("nope"), None);
    }
}
