//! Normalización de las hojas a registros tipados.
//!
//! Las columnas opcionales se resuelven una sola vez aquí, con un valor por
//! defecto documentado y una advertencia legible para el operador:
//! - sin `Estado`: toda interrupción está activa (con la columna, una celda
//!   vacía omite la fila);
//! - sin `Alcance`: toda interrupción es global (con la columna, una celda
//!   vacía toma el curso de `Afectados`);
//! - sin `Afectados`: ninguna interrupción nombra un curso;
//! - sin `Curso` en MATERIAS: ninguna materia pertenece a un curso;
//! - sin `Horas_Totales`: cada materia aporta 0 horas.
//!
//! Las interrupciones con fechas ilegibles, invertidas o con un alcance que
//! no se puede resolver se omiten (también con advertencia).

use tracing::{debug, warn};

use crate::algorithm::dates::normalize_date;
use crate::error::ErrorAlmacen;
use crate::excel::tabla::{Celda, Tabla};
use crate::excel::{columnas, hojas, AlmacenTabular};
use crate::models::{Alcance, Curso, EstadoInterrupcion, Interrupcion, Materia};

/// Copia de CURSOS, MATERIAS e INTERRUPCIONES para un único cálculo.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub cursos: Vec<Curso>,
    pub materias: Vec<Materia>,
    pub interrupciones: Vec<Interrupcion>,
    /// Valores por defecto aplicados y filas omitidas.
    pub advertencias: Vec<String>,
    /// Columnas requeridas de CURSOS que no están en la hoja.
    pub columnas_faltantes_cursos: Vec<String>,
}

/// Lee las tres hojas del almacén. Una hoja ausente es error de configuración.
pub fn leer_snapshot(almacen: &dyn AlmacenTabular) -> Result<Snapshot, ErrorAlmacen> {
    let cursos = almacen.leer_tabla(hojas::CURSOS)?;
    let materias = almacen.leer_tabla(hojas::MATERIAS)?;
    let interrupciones = almacen.leer_tabla(hojas::INTERRUPCIONES)?;
    let snap = Snapshot::desde_tablas(&cursos, &materias, &interrupciones);
    debug!(
        cursos = snap.cursos.len(),
        materias = snap.materias.len(),
        interrupciones = snap.interrupciones.len(),
        advertencias = snap.advertencias.len(),
        "snapshot cargado"
    );
    Ok(snap)
}

fn texto_en(tabla: &Tabla, fila: usize, col: Option<usize>) -> String {
    col.map(|c| tabla.celda(fila, c).texto()).unwrap_or_default()
}

fn fila_vacia(tabla: &Tabla, fila: usize) -> bool {
    tabla.filas[fila].iter().all(Celda::es_vacia)
}

impl Snapshot {
    pub fn desde_tablas(cursos: &Tabla, materias: &Tabla, interrupciones: &Tabla) -> Snapshot {
        let mut snap = Snapshot::default();
        snap.cargar_cursos(cursos);
        snap.cargar_materias(materias);
        snap.cargar_interrupciones(interrupciones);
        for a in &snap.advertencias {
            warn!("{}", a);
        }
        snap
    }

    pub fn curso(&self, curso_id: &str) -> Option<&Curso> {
        let curso_id = curso_id.trim();
        self.cursos.iter().find(|c| c.id == curso_id)
    }

    fn advertir(&mut self, msg: String) {
        self.advertencias.push(msg);
    }

    fn cargar_cursos(&mut self, t: &Tabla) {
        let id = t.columna(columnas::ID_CURSO);
        let inicio = t.columna(columnas::INICIO_CLASES);
        let fin = t.columna(columnas::FIN_CLASES);
        for (nombre, col) in [
            (columnas::ID_CURSO, id),
            (columnas::INICIO_CLASES, inicio),
            (columnas::FIN_CLASES, fin),
        ] {
            if col.is_none() {
                self.columnas_faltantes_cursos.push(nombre.to_string());
            }
        }
        let Some(id) = id else { return };

        for fila in 0..t.len() {
            let curso_id = t.celda(fila, id).texto();
            if curso_id.is_empty() {
                continue;
            }
            self.cursos.push(Curso {
                id: curso_id,
                inicio: inicio.map(|c| t.celda(fila, c).clone()).unwrap_or(Celda::Vacia),
                fin: fin.map(|c| t.celda(fila, c).clone()).unwrap_or(Celda::Vacia),
            });
        }
    }

    fn cargar_materias(&mut self, t: &Tabla) {
        let curso = t.columna(columnas::CURSO);
        let horas = t.columna(columnas::HORAS_TOTALES);
        if curso.is_none() {
            self.advertir(format!(
                "{} sin columna '{}': ninguna materia se asocia a un curso",
                hojas::MATERIAS,
                columnas::CURSO
            ));
        }
        if horas.is_none() {
            self.advertir(format!(
                "{} sin columna '{}': se asumen 0 horas por materia",
                hojas::MATERIAS,
                columnas::HORAS_TOTALES
            ));
        }

        for fila in 0..t.len() {
            if fila_vacia(t, fila) {
                continue;
            }
            let horas_totales = match horas.map(|c| t.celda(fila, c)) {
                None => 0.0,
                Some(celda) if celda.es_vacia() => 0.0,
                Some(celda) => match celda.numero() {
                    Some(h) if h >= 0.0 => h,
                    _ => {
                        self.advertir(format!(
                            "{} fila {}: '{}' = '{}' no es un número de horas válido; se usan 0",
                            hojas::MATERIAS,
                            fila + 2,
                            columnas::HORAS_TOTALES,
                            celda.texto()
                        ));
                        0.0
                    }
                },
            };
            let curso_id = texto_en(t, fila, curso);
            self.materias.push(Materia {
                curso: if curso_id.is_empty() { None } else { Some(curso_id) },
                horas_totales,
            });
        }
    }

    fn cargar_interrupciones(&mut self, t: &Tabla) {
        let id = t.columna(columnas::ID_EVENTO);
        let nombre = t.columna(columnas::NOMBRE_EVENTO);
        let inicio = t.columna(columnas::FECHA_INICIO);
        let fin = t.columna(columnas::FECHA_FIN);
        let tipo = t.columna(columnas::TIPO);
        let alcance = t.columna(columnas::ALCANCE);
        let afectados = t.columna(columnas::AFECTADOS);
        let estado = t.columna(columnas::ESTADO);
        let justificacion = t.columna(columnas::JUSTIFICACION);

        if t.is_empty() {
            return;
        }
        let (Some(inicio), Some(fin)) = (inicio, fin) else {
            self.advertir(format!(
                "{} sin columnas '{}'/'{}': no se consideran interrupciones",
                hojas::INTERRUPCIONES,
                columnas::FECHA_INICIO,
                columnas::FECHA_FIN
            ));
            return;
        };
        for (col, nombre_col, defecto) in [
            (estado, columnas::ESTADO, "todas se consideran ACTIVO"),
            (alcance, columnas::ALCANCE, "todas se consideran GLOBAL"),
            (afectados, columnas::AFECTADOS, "ninguna afecta a un curso específico"),
        ] {
            if col.is_none() {
                self.advertir(format!("{} sin columna '{}': {}", hojas::INTERRUPCIONES, nombre_col, defecto));
            }
        }

        for fila in 0..t.len() {
            if fila_vacia(t, fila) {
                continue;
            }
            let fila_hoja = fila + 2;
            let id_evento = texto_en(t, fila, id);
            let etiqueta = if id_evento.is_empty() { format!("fila {}", fila_hoja) } else { id_evento.clone() };

            let fecha_inicio = match normalize_date(t.celda(fila, inicio)) {
                Ok(d) => d,
                Err(e) => {
                    self.advertir(format!("interrupción {} omitida: {} inválida ({})", etiqueta, columnas::FECHA_INICIO, e));
                    continue;
                }
            };
            let fecha_fin = match normalize_date(t.celda(fila, fin)) {
                Ok(d) => d,
                Err(e) => {
                    self.advertir(format!("interrupción {} omitida: {} inválida ({})", etiqueta, columnas::FECHA_FIN, e));
                    continue;
                }
            };
            if fecha_inicio > fecha_fin {
                self.advertir(format!(
                    "interrupción {} omitida: inicio {} posterior a fin {}",
                    etiqueta, fecha_inicio, fecha_fin
                ));
                continue;
            }

            // sin columna Estado todas son activas; con columna, una celda
            // vacía no es ACTIVO
            let estado_interrupcion = match estado {
                None => EstadoInterrupcion::Activa,
                Some(c) => {
                    let estado_txt = t.celda(fila, c).texto();
                    if estado_txt.is_empty() {
                        self.advertir(format!("interrupción {} omitida: estado vacío", etiqueta));
                        continue;
                    }
                    let Some(e) = EstadoInterrupcion::desde_etiqueta(&estado_txt) else {
                        self.advertir(format!("interrupción {} omitida: estado desconocido '{}'", etiqueta, estado_txt));
                        continue;
                    };
                    e
                }
            };

            // sin columna Alcance todas son globales; con columna, sólo GLOBAL
            // es global y el resto necesita un curso en Afectados
            let afectado = texto_en(t, fila, afectados);
            let alcance_interrupcion = match alcance {
                None => Alcance::Global,
                Some(c) => {
                    let alcance_txt = t.celda(fila, c).texto().to_uppercase();
                    match (alcance_txt.as_str(), afectado.is_empty()) {
                        ("GLOBAL", _) => Alcance::Global,
                        (_, false) => Alcance::Especifico(afectado),
                        ("", true) => {
                            self.advertir(format!("interrupción {} omitida: sin alcance ni curso afectado", etiqueta));
                            continue;
                        }
                        ("ESPECIFICO" | "ESPECÍFICO", true) => {
                            self.advertir(format!("interrupción {} omitida: alcance específico sin curso afectado", etiqueta));
                            continue;
                        }
                        (otro, true) => {
                            self.advertir(format!("interrupción {} omitida: alcance desconocido '{}'", etiqueta, otro));
                            continue;
                        }
                    }
                }
            };

            let nombre_evento = texto_en(t, fila, nombre);
            self.interrupciones.push(Interrupcion {
                nombre: if nombre_evento.is_empty() { etiqueta.clone() } else { nombre_evento },
                id: id_evento,
                inicio: fecha_inicio,
                fin: fecha_fin,
                tipo: texto_en(t, fila, tipo),
                alcance: alcance_interrupcion,
                estado: estado_interrupcion,
                justificacion: texto_en(t, fila, justificacion),
            });
        }
    }
}
